//! Type-erased access to every record collection in a document.
//!
//! The locator maps a normalized type tag to an [`EntityStore`], a small
//! capability object that can find, remove, insert and replace records of one
//! type from snapshots. New record kinds register independently through
//! [`EntityLocator::register`]; nothing here matches on concrete types.
//!
//! Unknown tags, unknown IDs and malformed snapshots yield `None` or `false`.
//! None of the operations panic or return errors.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::rc::Rc;

use tally_core::document::{CompanyDocument, HasRecords};
use tally_core::entities::{
    Accountant, Category, Customer, Department, Employee, Expense, Invoice, Location, LostDamaged,
    Payment, Product, PurchaseOrder, RecurringInvoice, Record, RentalItem, RentalRecord,
    ReturnRecord, Revenue, StockAdjustment, StockTransfer, Supplier,
};
use tally_core::enums::{EntityType, normalize_tag};
use tally_core::snapshot;

/// Read-only view of a located record.
pub trait RecordView {
    fn record_id(&self) -> &str;
    fn record_name(&self) -> &str;
    fn snapshot(&self) -> Option<String>;
}

impl<R: Record> RecordView for R {
    fn record_id(&self) -> &str {
        self.id()
    }

    fn record_name(&self) -> &str {
        self.display_name()
    }

    fn snapshot(&self) -> Option<String> {
        snapshot::encode(self).ok()
    }
}

/// Capabilities over one record collection of a context `C`.
pub trait EntityStore<C> {
    fn entity_type(&self) -> EntityType;
    fn find<'a>(&self, ctx: &'a C, id: &str) -> Option<&'a dyn RecordView>;
    fn find_id_by_name(&self, ctx: &C, name: &str) -> Option<String>;
    fn remove(&self, ctx: &mut C, id: &str) -> bool;
    /// Insert a record decoded from `json`. Rejects duplicates by ID.
    fn add_from_snapshot(&self, ctx: &mut C, json: &str) -> bool;
    /// Overwrite the record whose ID matches the one in `json`.
    fn replace_from_snapshot(&self, ctx: &mut C, json: &str) -> bool;
    fn len(&self, ctx: &C) -> usize;
}

/// [`EntityStore`] backed by a `Vec<R>` reached through [`HasRecords`].
pub struct CollectionStore<R> {
    _record: PhantomData<fn() -> R>,
}

impl<R> CollectionStore<R> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<R> Default for CollectionStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, R> EntityStore<C> for CollectionStore<R>
where
    C: HasRecords<R>,
    R: Record,
{
    fn entity_type(&self) -> EntityType {
        R::ENTITY_TYPE
    }

    fn find<'a>(&self, ctx: &'a C, id: &str) -> Option<&'a dyn RecordView> {
        ctx.records()
            .iter()
            .find(|r| r.id() == id)
            .map(|r| r as &dyn RecordView)
    }

    fn find_id_by_name(&self, ctx: &C, name: &str) -> Option<String> {
        ctx.records()
            .iter()
            .find(|r| r.display_name() == name)
            .map(|r| r.id().to_string())
    }

    fn remove(&self, ctx: &mut C, id: &str) -> bool {
        let records = ctx.records_mut();
        let Some(pos) = records.iter().position(|r| r.id() == id) else {
            return false;
        };
        records.remove(pos);
        true
    }

    fn add_from_snapshot(&self, ctx: &mut C, json: &str) -> bool {
        let Ok(record) = snapshot::decode::<R>(json) else {
            tracing::debug!("malformed {} snapshot", R::ENTITY_TYPE);
            return false;
        };
        let records = ctx.records_mut();
        if records.iter().any(|r| r.id() == record.id()) {
            return false;
        }
        records.push(record);
        true
    }

    fn replace_from_snapshot(&self, ctx: &mut C, json: &str) -> bool {
        let Ok(record) = snapshot::decode::<R>(json) else {
            tracing::debug!("malformed {} snapshot", R::ENTITY_TYPE);
            return false;
        };
        match ctx.records_mut().iter_mut().find(|r| r.id() == record.id()) {
            Some(slot) => {
                *slot = record;
                true
            }
            None => false,
        }
    }

    fn len(&self, ctx: &C) -> usize {
        ctx.records().len()
    }
}

/// Registry of [`EntityStore`]s keyed by normalized type tag.
pub struct EntityLocator<C> {
    stores: HashMap<String, Rc<dyn EntityStore<C>>>,
}

impl<C> fmt::Debug for EntityLocator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityLocator")
            .field("types", &self.entity_types())
            .finish()
    }
}

impl<C> Default for EntityLocator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EntityLocator<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            stores: HashMap::new(),
        }
    }

    /// Register the collection holding `R`, reachable by its tag and label.
    pub fn register<R>(&mut self)
    where
        C: HasRecords<R>,
        R: Record,
    {
        self.register_store(Rc::new(CollectionStore::<R>::new()));
    }

    /// Register a store under its entity type's tag and label.
    pub fn register_store(&mut self, store: Rc<dyn EntityStore<C>>) {
        let entity = store.entity_type();
        self.stores
            .insert(normalize_tag(entity.as_str()), Rc::clone(&store));
        self.stores.insert(normalize_tag(entity.label()), store);
    }

    /// Resolve a tag, ignoring case, spaces, underscores and hyphens.
    #[must_use]
    pub fn store(&self, tag: &str) -> Option<&dyn EntityStore<C>> {
        self.stores.get(&normalize_tag(tag)).map(|store| &**store)
    }

    #[must_use]
    pub fn supports(&self, tag: &str) -> bool {
        self.store(tag).is_some()
    }

    /// Registered entity types, in [`EntityType::ALL`] order.
    #[must_use]
    pub fn entity_types(&self) -> Vec<EntityType> {
        EntityType::ALL
            .into_iter()
            .filter(|entity| self.supports(entity.as_str()))
            .collect()
    }

    #[must_use]
    pub fn find<'a>(&self, ctx: &'a C, tag: &str, id: &str) -> Option<&'a dyn RecordView> {
        self.store(tag)?.find(ctx, id)
    }

    #[must_use]
    pub fn find_id_by_name(&self, ctx: &C, tag: &str, name: &str) -> Option<String> {
        self.store(tag)?.find_id_by_name(ctx, name)
    }

    /// Current snapshot of a live record.
    #[must_use]
    pub fn snapshot(&self, ctx: &C, tag: &str, id: &str) -> Option<String> {
        self.find(ctx, tag, id)?.snapshot()
    }

    pub fn remove(&self, ctx: &mut C, tag: &str, id: &str) -> bool {
        self.store(tag).is_some_and(|s| s.remove(ctx, id))
    }

    pub fn add_from_snapshot(&self, ctx: &mut C, tag: &str, json: &str) -> bool {
        self.store(tag).is_some_and(|s| s.add_from_snapshot(ctx, json))
    }

    pub fn replace_from_snapshot(&self, ctx: &mut C, tag: &str, json: &str) -> bool {
        self.store(tag)
            .is_some_and(|s| s.replace_from_snapshot(ctx, json))
    }
}

impl EntityLocator<CompanyDocument> {
    /// Locator over every collection of a [`CompanyDocument`].
    #[must_use]
    pub fn for_company() -> Self {
        let mut locator = Self::new();
        locator.register::<Customer>();
        locator.register::<Supplier>();
        locator.register::<Product>();
        locator.register::<Category>();
        locator.register::<Department>();
        locator.register::<Employee>();
        locator.register::<Location>();
        locator.register::<Accountant>();
        locator.register::<Invoice>();
        locator.register::<Expense>();
        locator.register::<Revenue>();
        locator.register::<Payment>();
        locator.register::<PurchaseOrder>();
        locator.register::<RecurringInvoice>();
        locator.register::<RentalItem>();
        locator.register::<RentalRecord>();
        locator.register::<StockAdjustment>();
        locator.register::<StockTransfer>();
        locator.register::<ReturnRecord>();
        locator.register::<LostDamaged>();
        locator
    }
}
