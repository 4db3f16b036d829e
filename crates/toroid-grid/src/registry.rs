//! The type-indexed registry of attribute grids.

use std::any::TypeId;
use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use toroid_core::{Bounds, Coord};

use crate::attribute::{Attribute, AttributeKind, ErasedGrid};
use crate::error::RegistryError;
use crate::grid::AttributeGrid;
use crate::set::AttributeSet;

type ResizeListener = Box<dyn FnMut(&mut GridRegistry)>;

/// Handle returned by [`GridRegistry::on_resize`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResizeSubscription(u64);

/// A set of equally shaped attribute grids, at most one per attribute type.
///
/// Every registered grid has the registry's `count` as its size. Grids are
/// created with [`create_grid`](Self::create_grid) and afterwards addressed
/// by their attribute type alone:
///
/// ```
/// use toroid_core::Coord;
/// use toroid_grid::GridRegistry;
///
/// let mut reg = GridRegistry::new(Coord::new(4, 4, 1));
/// reg.create_grid::<u8>().unwrap();
/// reg.create_grid::<char>().unwrap();
/// reg.set_many(Coord::new(1, 2, 0), (7u8, 'x')).unwrap();
/// assert_eq!(reg.get::<char>(Coord::new(1, 2, 0)).unwrap(), 'x');
/// ```
pub struct GridRegistry {
    count: Coord,
    grids: IndexMap<TypeId, Box<dyn ErasedGrid>>,
    listeners: Vec<(ResizeSubscription, ResizeListener)>,
    next_subscription: u64,
}

impl GridRegistry {
    /// An empty registry whose grids will have `count` cells per axis.
    pub fn new(count: Coord) -> Self {
        Self {
            count,
            grids: IndexMap::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Cells per axis shared by every grid.
    #[inline]
    pub fn count(&self) -> Coord {
        self.count
    }

    /// Whether `c` lies inside `0..count` on every axis.
    #[inline]
    pub fn in_bounds(&self, c: Coord) -> bool {
        c.in_extent(self.count)
    }

    /// The full coordinate box.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        Bounds::from_extent(self.count)
    }

    /// Number of registered grids.
    pub fn len(&self) -> usize {
        self.grids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grids.is_empty()
    }

    /// Whether `T` has a grid.
    pub fn contains<T: Attribute>(&self) -> bool {
        self.grids.contains_key(&TypeId::of::<T>())
    }

    // -----------------------------------------------------------------------
    // Registration
    // -----------------------------------------------------------------------

    /// Register a grid for `T`, sized to the current count and filled with
    /// `T::default()`.
    pub fn create_grid<T: Attribute>(&mut self) -> Result<(), RegistryError> {
        match self.grids.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => Err(RegistryError::duplicate::<T>()),
            Entry::Vacant(slot) => {
                log::debug!(
                    "creating grid {} with count {}",
                    std::any::type_name::<T>(),
                    self.count
                );
                slot.insert(Box::new(AttributeGrid::<T>::new(self.count)));
                Ok(())
            }
        }
    }

    /// Unregister the grid for `T`, dropping its values.
    pub fn destroy_grid<T: Attribute>(&mut self) -> Result<(), RegistryError> {
        match self.grids.shift_remove(&TypeId::of::<T>()) {
            Some(_) => {
                log::debug!("destroyed grid {}", std::any::type_name::<T>());
                Ok(())
            }
            None => Err(RegistryError::not_found::<T>()),
        }
    }

    /// Unregister by runtime handle. Returns whether a grid was removed.
    pub fn destroy_kind(&mut self, kind: AttributeKind) -> bool {
        let removed = self.grids.shift_remove(&kind.type_id()).is_some();
        if removed {
            log::debug!("destroyed grid {kind}");
        }
        removed
    }

    /// Unregister every grid. Resize listeners stay subscribed.
    pub fn clear(&mut self) {
        log::debug!("clearing {} grids", self.grids.len());
        self.grids.clear();
    }

    /// Registered attribute kinds in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = AttributeKind> {
        self.grids.values().map(|g| g.kind())
    }

    // -----------------------------------------------------------------------
    // Typed access
    // -----------------------------------------------------------------------

    /// The grid holding `T`.
    pub fn grid<T: Attribute>(&self) -> Result<&AttributeGrid<T>, RegistryError> {
        self.grids
            .get(&TypeId::of::<T>())
            .and_then(|g| g.as_any().downcast_ref::<AttributeGrid<T>>())
            .ok_or_else(RegistryError::not_found::<T>)
    }

    /// Mutable access to the grid holding `T`.
    ///
    /// Resizing the returned grid directly leaves it out of step with the
    /// others; bundle operations then report `InconsistentAttributes`.
    pub fn grid_mut<T: Attribute>(&mut self) -> Result<&mut AttributeGrid<T>, RegistryError> {
        self.grids
            .get_mut(&TypeId::of::<T>())
            .and_then(|g| g.as_any_mut().downcast_mut::<AttributeGrid<T>>())
            .ok_or_else(RegistryError::not_found::<T>)
    }

    /// Read the `T` value at `c`.
    ///
    /// # Panics
    ///
    /// If `c` is outside the grid.
    #[track_caller]
    pub fn get<T: Attribute>(&self, c: Coord) -> Result<T, RegistryError> {
        Ok(self.grid::<T>()?.get(c))
    }

    /// Write the `T` value at `c`.
    ///
    /// # Panics
    ///
    /// If `c` is outside the grid.
    #[track_caller]
    pub fn set<T: Attribute>(&mut self, c: Coord, value: T) -> Result<(), RegistryError> {
        self.grid_mut::<T>()?.set(c, value);
        Ok(())
    }

    /// Read the `T` value at `c`, or `None` if `c` is out of bounds.
    pub fn try_get<T: Attribute>(&self, c: Coord) -> Result<Option<T>, RegistryError> {
        Ok(self.grid::<T>()?.try_get(c))
    }

    /// Write the `T` value at `c`. Returns `false` and writes nothing if `c`
    /// is out of bounds.
    pub fn try_set<T: Attribute>(&mut self, c: Coord, value: T) -> Result<bool, RegistryError> {
        Ok(self.grid_mut::<T>()?.try_set(c, value))
    }

    /// Set every `T` value back to `T::default()`.
    pub fn reset<T: Attribute>(&mut self) -> Result<(), RegistryError> {
        self.grid_mut::<T>()?.clear();
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Bundles
    // -----------------------------------------------------------------------

    /// Read every member of `S` at `c`.
    ///
    /// # Panics
    ///
    /// If `c` is outside the grids.
    #[track_caller]
    pub fn get_many<S: AttributeSet>(&self, c: Coord) -> Result<S, RegistryError> {
        S::ensure_registered(self)?;
        S::fetch(self, c)
    }

    /// Write every member of `values` at `c`. Nothing is written unless all
    /// members are registered.
    ///
    /// # Panics
    ///
    /// If `c` is outside the grids.
    #[track_caller]
    pub fn set_many<S: AttributeSet>(&mut self, c: Coord, values: S) -> Result<(), RegistryError> {
        S::ensure_registered(self)?;
        values.store(self, c)
    }

    /// Checked bundle read: `None` on the first member that misses.
    pub fn try_get_many<S: AttributeSet>(&self, c: Coord) -> Result<Option<S>, RegistryError> {
        S::ensure_registered(self)?;
        S::try_fetch(self, c)
    }

    /// Checked bundle write. Every member's registration is validated
    /// before anything is written; writing then stops at the first member
    /// whose grid does not contain `c`.
    pub fn try_set_many<S: AttributeSet>(
        &mut self,
        c: Coord,
        values: S,
    ) -> Result<bool, RegistryError> {
        S::ensure_registered(self)?;
        values.try_store(self, c)
    }

    // -----------------------------------------------------------------------
    // Transforms
    // -----------------------------------------------------------------------

    /// Visit every `(coordinate, value)` of `T`, x fastest then y then z.
    pub fn transform<T: Attribute>(&self, f: impl FnMut(Coord, &T)) -> Result<(), RegistryError> {
        self.grid::<T>()?.for_each(f);
        Ok(())
    }

    /// Like [`transform`](Self::transform) restricted to `bounds`, clipped
    /// to the grid.
    pub fn transform_in<T: Attribute>(
        &self,
        bounds: Bounds,
        f: impl FnMut(Coord, &T),
    ) -> Result<(), RegistryError> {
        self.grid::<T>()?.for_each_in(bounds, f);
        Ok(())
    }

    /// Rewrite every `T` value in place.
    pub fn update<T: Attribute>(
        &mut self,
        f: impl FnMut(Coord, &mut T),
    ) -> Result<(), RegistryError> {
        self.grid_mut::<T>()?.update(f);
        Ok(())
    }

    /// Like [`update`](Self::update) restricted to `bounds`, clipped to the
    /// grid.
    pub fn update_in<T: Attribute>(
        &mut self,
        bounds: Bounds,
        f: impl FnMut(Coord, &mut T),
    ) -> Result<(), RegistryError> {
        self.grid_mut::<T>()?.update_in(bounds, f);
        Ok(())
    }

    /// Visit the primary attribute's grid, handing the callback every
    /// member of `S` at each coordinate.
    pub fn transform_many<S: AttributeSet>(
        &self,
        f: impl FnMut(Coord, &S),
    ) -> Result<(), RegistryError> {
        let region = S::primary_bounds(self)?;
        self.visit_many(region, f)
    }

    /// Like [`transform_many`](Self::transform_many) restricted to
    /// `bounds`, clipped to the primary grid.
    pub fn transform_many_in<S: AttributeSet>(
        &self,
        bounds: Bounds,
        f: impl FnMut(Coord, &S),
    ) -> Result<(), RegistryError> {
        let region = S::primary_bounds(self)?.intersect(bounds);
        self.visit_many(region, f)
    }

    /// Read-modify-write every member of `S` over the primary attribute's
    /// grid.
    pub fn update_many<S: AttributeSet>(
        &mut self,
        f: impl FnMut(Coord, &mut S),
    ) -> Result<(), RegistryError> {
        let region = S::primary_bounds(self)?;
        self.rewrite_many(region, f)
    }

    /// Like [`update_many`](Self::update_many) restricted to `bounds`,
    /// clipped to the primary grid.
    pub fn update_many_in<S: AttributeSet>(
        &mut self,
        bounds: Bounds,
        f: impl FnMut(Coord, &mut S),
    ) -> Result<(), RegistryError> {
        let region = S::primary_bounds(self)?.intersect(bounds);
        self.rewrite_many(region, f)
    }

    fn visit_many<S: AttributeSet>(
        &self,
        region: Bounds,
        mut f: impl FnMut(Coord, &S),
    ) -> Result<(), RegistryError> {
        S::ensure_registered(self)?;
        for c in region {
            let values = S::fetch_aligned(self, c)?;
            f(c, &values);
        }
        Ok(())
    }

    fn rewrite_many<S: AttributeSet>(
        &mut self,
        region: Bounds,
        mut f: impl FnMut(Coord, &mut S),
    ) -> Result<(), RegistryError> {
        S::ensure_registered(self)?;
        for c in region {
            let mut values = S::fetch_aligned(self, c)?;
            f(c, &mut values);
            values.store(self, c)?;
        }
        Ok(())
    }

    /// Visit every coordinate of the lattice.
    pub fn for_each_coord(&self, f: impl FnMut(Coord)) {
        self.bounds().iter().for_each(f);
    }

    /// Visit every coordinate of `bounds` that lies in the lattice.
    pub fn for_each_coord_in(&self, bounds: Bounds, f: impl FnMut(Coord)) {
        self.bounds().intersect(bounds).iter().for_each(f);
    }

    // -----------------------------------------------------------------------
    // Resize
    // -----------------------------------------------------------------------

    /// Resize every grid to `count`, keeping the overlapping values, then
    /// notify the resize listeners in subscription order.
    ///
    /// A listener may resize the registry again. The nested call only
    /// resizes the grids; once the current round ends every listener is
    /// notified again, until a round leaves `count` unchanged.
    pub fn resize(&mut self, count: Coord) {
        self.resize_grids(count);
        loop {
            let notified = self.count;
            let mut listeners = std::mem::take(&mut self.listeners);
            for (sub, listener) in listeners.iter_mut() {
                log::trace!("notifying resize listener {}", sub.0);
                listener(self);
            }
            // Subscriptions made while notifying go after the existing ones.
            listeners.append(&mut self.listeners);
            self.listeners = listeners;
            if self.count == notified {
                break;
            }
            log::debug!("resized to {} while notifying, notifying again", self.count);
        }
    }

    fn resize_grids(&mut self, count: Coord) {
        log::debug!("resizing {} grids from {} to {count}", self.grids.len(), self.count);
        self.count = count;
        for grid in self.grids.values_mut() {
            grid.resize(count);
        }
    }

    /// Subscribe `f` to be called after every [`resize`](Self::resize).
    ///
    /// Listeners are detached from the registry while they run, so a
    /// listener that panics takes every subscription with it.
    pub fn on_resize(
        &mut self,
        f: impl FnMut(&mut GridRegistry) + 'static,
    ) -> ResizeSubscription {
        let sub = ResizeSubscription(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((sub, Box::new(f)));
        sub
    }

    /// Unsubscribe a resize listener. Returns whether it was subscribed.
    ///
    /// While listeners are being notified they are detached from the
    /// registry, so calling this from inside a listener returns `false`.
    pub fn remove_resize_listener(&mut self, sub: ResizeSubscription) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(s, _)| *s != sub);
        self.listeners.len() != before
    }

    // -----------------------------------------------------------------------
    // Introspection
    // -----------------------------------------------------------------------

    /// Visit the values of the grid named by `kind` as `Debug` values,
    /// over `bounds` (clipped) or the whole lattice.
    pub fn debug_transform(
        &self,
        kind: AttributeKind,
        bounds: Option<Bounds>,
        mut f: impl FnMut(Coord, &dyn fmt::Debug),
    ) -> Result<(), RegistryError> {
        let grid = self
            .grids
            .get(&kind.type_id())
            .ok_or(RegistryError::GridNotFound {
                type_name: kind.type_name(),
            })?;
        let all = self.bounds();
        let region = bounds.map_or(all, |b| all.intersect(b));
        grid.debug_each(region, &mut f);
        Ok(())
    }
}

impl fmt::Debug for GridRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridRegistry")
            .field("count", &self.count)
            .field("kinds", &self.kinds().map(|k| k.type_name()).collect::<Vec<_>>())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    #[derive(Default, Clone, Debug, PartialEq)]
    struct Heat(i32);

    #[derive(Default, Clone, Debug, PartialEq)]
    struct Wall(bool);

    #[derive(Default, Clone, Debug, PartialEq)]
    struct Dust(u8);

    #[derive(Default, Clone, Debug, PartialEq)]
    struct Glow(u16);

    fn registry() -> GridRegistry {
        let mut reg = GridRegistry::new(Coord::new(3, 2, 2));
        reg.create_grid::<Heat>().unwrap();
        reg.create_grid::<Wall>().unwrap();
        reg
    }

    fn registry4() -> GridRegistry {
        let mut reg = registry();
        reg.create_grid::<Dust>().unwrap();
        reg.create_grid::<Glow>().unwrap();
        reg
    }

    // ---- registration ----

    #[test]
    fn create_twice_fails() {
        let mut reg = registry();
        assert_eq!(
            reg.create_grid::<Heat>(),
            Err(RegistryError::DuplicateGrid {
                type_name: std::any::type_name::<Heat>()
            })
        );
        assert_eq!(reg.len(), 2);
    }

    #[test]
    fn new_grid_has_registry_count() {
        let reg = registry();
        assert_eq!(reg.grid::<Heat>().unwrap().size(), Coord::new(3, 2, 2));
        assert_eq!(reg.grid::<Wall>().unwrap().len(), 12);
    }

    #[test]
    fn destroy_then_access_fails() {
        let mut reg = registry();
        reg.destroy_grid::<Heat>().unwrap();
        assert!(!reg.contains::<Heat>());
        assert!(matches!(
            reg.get::<Heat>(Coord::ZERO),
            Err(RegistryError::GridNotFound { .. })
        ));
        assert!(reg.destroy_grid::<Heat>().is_err());
        assert!(!reg.destroy_kind(AttributeKind::of::<Heat>()));
        assert!(reg.destroy_kind(AttributeKind::of::<Wall>()));
        assert!(reg.is_empty());
    }

    #[test]
    fn kinds_follow_registration_order() {
        let mut reg = registry();
        reg.create_grid::<u8>().unwrap();
        reg.destroy_grid::<Heat>().unwrap();
        let kinds: Vec<_> = reg.kinds().collect();
        assert_eq!(
            kinds,
            vec![AttributeKind::of::<Wall>(), AttributeKind::of::<u8>()]
        );
    }

    #[test]
    fn clear_drops_all_grids() {
        let mut reg = registry();
        reg.clear();
        assert!(reg.is_empty());
        reg.create_grid::<Heat>().unwrap();
    }

    // ---- single attribute ----

    #[test]
    fn set_then_get() {
        let mut reg = registry();
        let c = Coord::new(2, 1, 1);
        reg.set(c, Heat(9)).unwrap();
        assert_eq!(reg.get::<Heat>(c).unwrap(), Heat(9));
        assert_eq!(reg.get::<Wall>(c).unwrap(), Wall(false));
    }

    #[test]
    fn try_access_out_of_bounds() {
        let mut reg = registry();
        let out = Coord::new(3, 0, 0);
        assert_eq!(reg.try_get::<Heat>(out).unwrap(), None);
        assert!(!reg.try_set(out, Heat(1)).unwrap());
        assert!(reg.try_set(Coord::ZERO, Heat(1)).unwrap());
        assert!(matches!(
            reg.try_get::<u64>(Coord::ZERO),
            Err(RegistryError::GridNotFound { .. })
        ));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn get_out_of_bounds_panics() {
        let reg = registry();
        let _ = reg.get::<Heat>(Coord::new(-1, 0, 0));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut reg = registry();
        reg.set(Coord::ONE, Heat(4)).unwrap();
        reg.set(Coord::ONE, Wall(true)).unwrap();
        reg.reset::<Heat>().unwrap();
        assert_eq!(reg.get::<Heat>(Coord::ONE).unwrap(), Heat(0));
        assert_eq!(reg.get::<Wall>(Coord::ONE).unwrap(), Wall(true));
    }

    // ---- bundles ----

    #[test]
    fn bundle_roundtrip() {
        let mut reg = registry();
        let c = Coord::new(1, 1, 0);
        reg.set_many(c, (Heat(3), Wall(true))).unwrap();
        let (h, w): (Heat, Wall) = reg.get_many(c).unwrap();
        assert_eq!((h, w), (Heat(3), Wall(true)));
    }

    #[test]
    fn bundle_write_validates_before_writing() {
        let mut reg = registry();
        let c = Coord::ZERO;
        let err = reg.try_set_many(c, (Heat(5), 7u32)).unwrap_err();
        assert!(matches!(err, RegistryError::GridNotFound { .. }));
        assert_eq!(reg.get::<Heat>(c).unwrap(), Heat(0));
        assert!(reg.set_many(c, (Heat(5), 7u32)).is_err());
        assert_eq!(reg.get::<Heat>(c).unwrap(), Heat(0));
    }

    #[test]
    fn try_bundle_out_of_bounds() {
        let mut reg = registry();
        let out = Coord::new(0, 5, 0);
        assert_eq!(reg.try_get_many::<(Heat, Wall)>(out).unwrap(), None);
        assert!(!reg.try_set_many(out, (Heat(1), Wall(true))).unwrap());
    }

    // ---- transforms ----

    #[test]
    fn transform_visits_x_fastest() {
        let mut reg = GridRegistry::new(Coord::new(2, 2, 1));
        reg.create_grid::<Heat>().unwrap();
        let mut seen = Vec::new();
        reg.transform::<Heat>(|c, _| seen.push(c)).unwrap();
        assert_eq!(
            seen,
            vec![
                Coord::new(0, 0, 0),
                Coord::new(1, 0, 0),
                Coord::new(0, 1, 0),
                Coord::new(1, 1, 0),
            ]
        );
    }

    #[test]
    fn update_in_is_inclusive_and_clipped() {
        let mut reg = registry();
        let region = Bounds::new(Coord::new(1, 0, 0), Coord::new(9, 0, 0));
        reg.update_in::<Heat>(region, |_, h| h.0 += 1).unwrap();
        let mut total = 0;
        reg.transform::<Heat>(|_, h| total += h.0).unwrap();
        assert_eq!(total, 2);
        assert_eq!(reg.get::<Heat>(Coord::new(2, 0, 0)).unwrap(), Heat(1));
    }

    #[test]
    fn update_many_writes_back_every_member() {
        let mut reg = registry();
        reg.update_many::<(Heat, Wall)>(|c, (h, w)| {
            h.0 = c.x + c.y;
            w.0 = c.z == 1;
        })
        .unwrap();
        assert_eq!(reg.get::<Heat>(Coord::new(2, 1, 0)).unwrap(), Heat(3));
        assert_eq!(reg.get::<Wall>(Coord::new(0, 0, 1)).unwrap(), Wall(true));
        let mut walls = 0;
        reg.transform_many::<(Wall, Heat)>(|_, (w, _)| walls += w.0 as i32)
            .unwrap();
        assert_eq!(walls, 6);
    }

    #[test]
    fn transform_many_in_clips_to_primary() {
        let reg = registry();
        let mut n = 0;
        reg.transform_many_in::<(Heat, Wall)>(
            Bounds::new(Coord::new(-4, -4, -4), Coord::ZERO),
            |_, _| n += 1,
        )
        .unwrap();
        assert_eq!(n, 1);
    }

    #[test]
    fn transform_many_needs_every_member() {
        let reg = registry();
        let mut called = false;
        let err = reg
            .transform_many::<(Heat, i64)>(|_, _| called = true)
            .unwrap_err();
        assert!(matches!(err, RegistryError::GridNotFound { .. }));
        assert!(!called);
    }

    #[test]
    fn drifted_secondary_is_inconsistent() {
        let mut reg = registry();
        reg.grid_mut::<Wall>().unwrap().resize(Coord::new(1, 1, 1));
        let err = reg.transform_many::<(Heat, Wall)>(|_, _| {}).unwrap_err();
        assert_eq!(
            err,
            RegistryError::InconsistentAttributes {
                type_name: std::any::type_name::<Wall>(),
                coord: Coord::new(1, 0, 0),
            }
        );
    }

    #[test]
    fn single_member_bundle() {
        let mut reg = registry();
        let c = Coord::new(2, 1, 1);
        reg.set_many(c, (Heat(6),)).unwrap();
        assert_eq!(reg.get::<Heat>(c).unwrap(), Heat(6));
        let (h,): (Heat,) = reg.get_many(c).unwrap();
        assert_eq!(h, Heat(6));
        assert_eq!(reg.try_get_many::<(Heat,)>(Coord::new(3, 0, 0)).unwrap(), None);
        let mut sum = 0;
        reg.transform_many::<(Heat,)>(|_, (h,)| sum += h.0).unwrap();
        assert_eq!(sum, 6);
    }

    #[test]
    fn four_member_bundle() {
        let mut reg = registry4();
        let c = Coord::new(2, 0, 1);
        let values = (Heat(2), Wall(true), Dust(2), Glow(3));
        reg.set_many(c, values.clone()).unwrap();
        let got: (Heat, Wall, Dust, Glow) = reg.get_many(c).unwrap();
        assert_eq!(got, values);
        assert_eq!(
            reg.try_get_many::<(Heat, Wall, Dust, Glow)>(c).unwrap(),
            Some(values)
        );
        assert!(
            !reg.try_set_many(Coord::new(0, 2, 0), (Heat(1), Wall(true), Dust(1), Glow(1)))
                .unwrap()
        );

        reg.update_many::<(Heat, Wall, Dust, Glow)>(|p, (h, w, d, g)| {
            h.0 += p.x;
            w.0 = !w.0;
            d.0 += 1;
            g.0 = h.0 as u16;
        })
        .unwrap();
        assert_eq!(
            reg.get_many::<(Heat, Wall, Dust, Glow)>(c).unwrap(),
            (Heat(4), Wall(false), Dust(3), Glow(4))
        );
        assert_eq!(
            reg.get_many::<(Heat, Wall, Dust, Glow)>(Coord::ZERO).unwrap(),
            (Heat(0), Wall(true), Dust(1), Glow(0))
        );

        let mut visits = 0;
        reg.transform_many::<(Glow, Dust, Wall, Heat)>(|_, (_, d, _, _)| {
            assert!(d.0 >= 1);
            visits += 1;
        })
        .unwrap();
        assert_eq!(visits, 12);
    }

    #[test]
    fn three_member_try_get_stops_at_drifted_middle() {
        let mut reg = registry4();
        let c = Coord::new(1, 1, 1);
        reg.set_many(c, (Heat(1), Wall(true), Dust(9))).unwrap();
        assert_eq!(
            reg.try_get_many::<(Heat, Wall, Dust)>(c).unwrap(),
            Some((Heat(1), Wall(true), Dust(9)))
        );

        reg.grid_mut::<Wall>().unwrap().resize(Coord::ONE);
        assert_eq!(reg.try_get_many::<(Heat, Wall, Dust)>(c).unwrap(), None);
        assert!(
            reg.try_get_many::<(Heat, Wall, Dust)>(Coord::ZERO)
                .unwrap()
                .is_some()
        );

        // Members before the miss are written, later ones are not.
        assert!(!reg.try_set_many(c, (Heat(5), Wall(false), Dust(5))).unwrap());
        assert_eq!(reg.get::<Heat>(c).unwrap(), Heat(5));
        assert_eq!(reg.get::<Dust>(c).unwrap(), Dust(9));
    }

    #[test]
    fn region_bundles_report_drifted_member() {
        let mut reg = registry4();
        reg.grid_mut::<Dust>().unwrap().resize(Coord::new(1, 2, 2));

        let mut seen = Vec::new();
        let err = reg
            .update_many_in::<(Heat, Wall, Dust)>(
                Bounds::new(Coord::ZERO, Coord::new(2, 0, 0)),
                |p, (h, _, _)| {
                    seen.push(p);
                    h.0 = 7;
                },
            )
            .unwrap_err();
        assert_eq!(
            err,
            RegistryError::InconsistentAttributes {
                type_name: std::any::type_name::<Dust>(),
                coord: Coord::new(1, 0, 0),
            }
        );
        assert_eq!(seen, vec![Coord::ZERO]);
        assert_eq!(reg.get::<Heat>(Coord::ZERO).unwrap(), Heat(7));
        assert_eq!(reg.get::<Heat>(Coord::new(1, 0, 0)).unwrap(), Heat(0));

        let err = reg
            .transform_many_in::<(Heat, Dust)>(
                Bounds::new(Coord::new(0, 1, 1), Coord::new(2, 1, 1)),
                |_, _| {},
            )
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::InconsistentAttributes { coord, .. } if coord == Coord::new(1, 1, 1)
        ));
    }

    #[test]
    fn for_each_coord_covers_lattice() {
        let reg = registry();
        let mut n = 0;
        reg.for_each_coord(|_| n += 1);
        assert_eq!(n, 12);
        let mut m = 0;
        reg.for_each_coord_in(Bounds::new(Coord::new(2, 1, 1), Coord::new(5, 5, 5)), |_| m += 1);
        assert_eq!(m, 1);
    }

    // ---- resize ----

    #[test]
    fn resize_keeps_overlap_and_notifies_in_order() {
        let mut reg = registry();
        reg.set(Coord::new(1, 1, 1), Heat(8)).unwrap();
        let log = Rc::new(RefCell::new(Vec::new()));

        let l1 = log.clone();
        reg.on_resize(move |r| l1.borrow_mut().push((1, r.count())));
        let l2 = log.clone();
        let second = reg.on_resize(move |r| l2.borrow_mut().push((2, r.count())));

        reg.resize(Coord::new(4, 4, 4));
        assert_eq!(reg.get::<Heat>(Coord::new(1, 1, 1)).unwrap(), Heat(8));
        assert_eq!(reg.get::<Heat>(Coord::new(3, 3, 3)).unwrap(), Heat(0));
        assert_eq!(reg.grid::<Wall>().unwrap().size(), Coord::new(4, 4, 4));
        assert_eq!(
            *log.borrow(),
            vec![(1, Coord::new(4, 4, 4)), (2, Coord::new(4, 4, 4))]
        );

        assert!(reg.remove_resize_listener(second));
        assert!(!reg.remove_resize_listener(second));
        reg.resize(Coord::ONE);
        assert_eq!(log.borrow().len(), 3);
    }

    #[test]
    fn listener_may_touch_registry() {
        let mut reg = registry();
        reg.on_resize(|r| {
            let corner = r.count() - Coord::ONE;
            r.set(corner, Heat(-1)).unwrap();
        });
        reg.resize(Coord::new(5, 1, 1));
        assert_eq!(reg.get::<Heat>(Coord::new(4, 0, 0)).unwrap(), Heat(-1));
    }

    #[test]
    fn listeners_hear_the_settled_size() {
        let mut reg = GridRegistry::new(Coord::new(2, 1, 1));
        reg.create_grid::<Heat>().unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let record = Rc::clone(&seen);
        reg.on_resize(move |r| record.borrow_mut().push(r.count()));
        reg.on_resize(|r| {
            if r.count().x < 8 {
                r.resize(Coord::new(8, 1, 1));
            }
        });

        reg.resize(Coord::new(4, 1, 1));
        assert_eq!(
            *seen.borrow(),
            vec![Coord::new(4, 1, 1), Coord::new(8, 1, 1)]
        );
        assert_eq!(reg.count(), Coord::new(8, 1, 1));
        assert_eq!(reg.grid::<Heat>().unwrap().size(), Coord::new(8, 1, 1));
    }

    // ---- introspection ----

    #[test]
    fn debug_transform_by_kind() {
        let mut reg = registry();
        reg.set(Coord::new(1, 0, 0), Heat(2)).unwrap();
        let mut out = Vec::new();
        reg.debug_transform(
            AttributeKind::of::<Heat>(),
            Some(Bounds::new(Coord::ZERO, Coord::new(1, 0, 0))),
            |c, v| out.push(format!("{c} {v:?}")),
        )
        .unwrap();
        assert_eq!(out, vec!["(0, 0, 0) Heat(0)", "(1, 0, 0) Heat(2)"]);
        assert!(
            reg.debug_transform(AttributeKind::of::<u8>(), None, |_, _| {})
                .is_err()
        );
    }
}
