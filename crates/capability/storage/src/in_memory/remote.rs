//! 遥控器内存存储实现
//!
//! 功能：
//! - 固定容量槽位，删除后槽位可复用
//! - id 单调分配，不复用已删除遥控器的 id

use crate::error::StorageError;
use crate::traits::RemoteStore;
use domain::{MAX_REMOTES, Remote, RemoteName};
use std::sync::RwLock;
use tracing::debug;

struct Slots {
    remotes: Vec<Remote>,
    next_id: u32,
}

/// 遥控器内存存储
pub struct InMemoryRemoteStore {
    slots: RwLock<Slots>,
}

impl InMemoryRemoteStore {
    /// 创建 `MAX_REMOTES` 个槽位的存储
    pub fn new() -> Self {
        Self::with_capacity(MAX_REMOTES)
    }

    /// 创建指定槽位数的存储
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: RwLock::new(Slots {
                remotes: vec![Remote::empty(); capacity],
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryRemoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteStore for InMemoryRemoteStore {
    fn get_remote(&self, id: u32) -> Result<Option<Remote>, StorageError> {
        if id == 0 {
            return Ok(None);
        }
        let item = self
            .slots
            .read()
            .map_err(|_| StorageError::new("lock failed"))?
            .remotes
            .iter()
            .find(|remote| remote.id == id)
            .cloned();
        Ok(item)
    }

    fn all_remotes(&self) -> Result<Vec<Remote>, StorageError> {
        let slots = self
            .slots
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(slots.remotes.clone())
    }

    fn create_remote(&self, name: &RemoteName) -> Result<Option<Remote>, StorageError> {
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        let id = slots.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StorageError::new("remote id space exhausted"))?;
        let Some(slot) = slots.remotes.iter_mut().find(|remote| remote.is_empty()) else {
            debug!(target: "somfy.storage", "no free remote slot");
            return Ok(None);
        };
        *slot = Remote::new(id, name.clone(), 0);
        let created = slot.clone();
        slots.next_id = next_id;
        Ok(Some(created))
    }

    fn delete_remote(&self, id: u32) -> Result<bool, StorageError> {
        if id == 0 {
            return Ok(false);
        }
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match slots.remotes.iter_mut().find(|remote| remote.id == id) {
            Some(slot) => {
                *slot = Remote::empty();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn update_remote(&self, remote: &Remote) -> Result<bool, StorageError> {
        if remote.is_empty() {
            return Ok(false);
        }
        let mut slots = self
            .slots
            .write()
            .map_err(|_| StorageError::new("lock failed"))?;
        match slots.remotes.iter_mut().find(|slot| slot.id == remote.id) {
            Some(slot) => {
                *slot = remote.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_overflow_leaves_slots_untouched() {
        let store = InMemoryRemoteStore::with_capacity(2);
        store.slots.write().expect("slots").next_id = u32::MAX;

        let name = RemoteName::new("Overflow").expect("name");
        assert!(store.create_remote(&name).is_err());

        let slots = store.all_remotes().expect("all");
        assert!(slots.iter().all(Remote::is_empty));
        assert_eq!(store.slots.read().expect("slots").next_id, u32::MAX);
    }
}
