//! Exclusive-ownership ordered collection
//!
//! An [`OwnedList`] holds item handles on behalf of one owner. The owner link
//! of every item lives in an [`OwnerRegistry`] kept next to the lists, and each
//! mutation checks first and then updates both the list and the registry, so
//! the two never disagree: an item is in exactly one list, or in none.

/// Storage that records which owner, if any, holds each item
pub trait OwnerRegistry<K> {
    /// Handle type of the owners
    type Owner: Copy + PartialEq;

    /// Current owner of `item`
    fn owner_of(&self, item: K) -> Option<Self::Owner>;

    /// Record a new owner for `item` (or none)
    fn set_owner(&mut self, item: K, owner: Option<Self::Owner>);
}

/// Reasons a collection mutation was rejected; nothing was changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnershipError<O> {
    /// The incoming item already belongs to `owner`
    AlreadyOwned {
        /// The item's current owner
        owner: O,
    },
    /// The position does not exist in the list
    OutOfRange {
        /// Requested position
        index: usize,
        /// Length of the list
        len: usize,
    },
}

/// Ordered list of items that all share one owner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedList<O, K> {
    owner: O,
    items: Vec<K>,
}

impl<O, K> OwnedList<O, K>
where
    O: Copy + PartialEq,
    K: Copy + PartialEq,
{
    /// Create an empty list held by `owner`
    pub fn new(owner: O) -> Self {
        Self {
            owner,
            items: Vec::new(),
        }
    }

    /// The owner every item in the list points back to
    pub fn owner(&self) -> O {
        self.owner
    }

    /// Items in order
    pub fn as_slice(&self) -> &[K] {
        &self.items
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Item at `index`
    pub fn get(&self, index: usize) -> Option<K> {
        self.items.get(index).copied()
    }

    /// Position of `item` in the list
    pub fn index_of(&self, item: K) -> Option<usize> {
        self.items.iter().position(|candidate| *candidate == item)
    }

    /// Append `item` and make this list's owner its owner
    pub fn push<R>(&mut self, item: K, registry: &mut R) -> Result<(), OwnershipError<O>>
    where
        R: OwnerRegistry<K, Owner = O>,
    {
        let len = self.items.len();
        self.insert(len, item, registry)
    }

    /// Insert `item` at `index` and make this list's owner its owner
    pub fn insert<R>(
        &mut self,
        index: usize,
        item: K,
        registry: &mut R,
    ) -> Result<(), OwnershipError<O>>
    where
        R: OwnerRegistry<K, Owner = O>,
    {
        if let Some(owner) = registry.owner_of(item) {
            return Err(OwnershipError::AlreadyOwned { owner });
        }
        if index > self.items.len() {
            return Err(OwnershipError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.insert(index, item);
        registry.set_owner(item, Some(self.owner));
        Ok(())
    }

    /// Remove the item at `index` and clear its owner
    pub fn remove<R>(&mut self, index: usize, registry: &mut R) -> Result<K, OwnershipError<O>>
    where
        R: OwnerRegistry<K, Owner = O>,
    {
        if index >= self.items.len() {
            return Err(OwnershipError::OutOfRange {
                index,
                len: self.items.len(),
            });
        }
        let item = self.items.remove(index);
        registry.set_owner(item, None);
        Ok(item)
    }

    /// Swap the item at `index` for `item`
    ///
    /// The outgoing item loses its owner and the incoming one gains it in the
    /// same step. Returns the outgoing item.
    pub fn replace<R>(
        &mut self,
        index: usize,
        item: K,
        registry: &mut R,
    ) -> Result<K, OwnershipError<O>>
    where
        R: OwnerRegistry<K, Owner = O>,
    {
        if let Some(owner) = registry.owner_of(item) {
            return Err(OwnershipError::AlreadyOwned { owner });
        }
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(OwnershipError::OutOfRange { index, len })?;
        let outgoing = std::mem::replace(slot, item);
        registry.set_owner(outgoing, None);
        registry.set_owner(item, Some(self.owner));
        Ok(outgoing)
    }

    /// Remove every item, clearing their owners
    pub fn clear<R>(&mut self, registry: &mut R)
    where
        R: OwnerRegistry<K, Owner = O>,
    {
        for item in self.items.drain(..) {
            registry.set_owner(item, None);
        }
    }
}
