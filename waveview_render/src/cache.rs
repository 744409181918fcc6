// Copyright 2026 the Waveview Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use waveview_viewport::Viewport;

use crate::raster::Raster;

/// View parameters a cached raster depends on.
///
/// Floating point parameters are compared by their bit patterns, so a key
/// only matches when the view is exactly the same.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Scroll position in scroll units.
    pub scroll: (u64, u64),
    /// Window width and height bits.
    pub window: (u64, u64),
    /// Tick width bits.
    pub tick_width: u64,
    /// Timing scale bits.
    pub scale_factor: u64,
}

impl CacheKey {
    /// Captures the key of `viewport`'s current state.
    #[must_use]
    pub fn from_viewport(viewport: &Viewport) -> Self {
        let window = viewport.window_size();
        Self {
            scroll: viewport.scroll(),
            window: (window.width.to_bits(), window.height.to_bits()),
            tick_width: viewport.tick_width().to_bits(),
            scale_factor: viewport.scale_factor().to_bits(),
        }
    }
}

/// What to do with the cache while the pointer is snapped to edges.
///
/// Finding the edge near the pointer can either be folded into gathering,
/// which means rebuilding the raster on every paint, or done separately by
/// searching the signal's edges while the cached raster is reused.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SnapPolicy {
    /// Rebuild the raster on every paint while snapping.
    #[default]
    RebuildEveryFrame,
    /// Keep the cached raster and search edges separately.
    ReuseCache,
}

/// Why a raster was rebuilt.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RebuildReason {
    /// Nothing was cached yet.
    FirstFrame,
    /// The view parameters changed.
    KeyChanged,
    /// [`RenderCache::invalidate`] was called.
    Invalidated,
    /// The caller forced a rebuild while tracking edges.
    SnapTracking,
}

impl fmt::Display for RebuildReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::FirstFrame => "first frame",
            Self::KeyChanged => "key changed",
            Self::Invalidated => "invalidated",
            Self::SnapTracking => "snap tracking",
        })
    }
}

/// Counters of a [`RenderCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Paints served from the cache.
    pub hits: u64,
    /// Rasters built.
    pub rebuilds: u64,
    /// Reason for the most recent rebuild.
    pub last_reason: Option<RebuildReason>,
}

/// Holds the static raster of the last frame and the key it was built for.
///
/// The cache is the only owner of the raster; callers borrow it for a paint.
#[derive(Debug, Default)]
pub struct RenderCache {
    raster: Raster,
    key: Option<CacheKey>,
    dirty: bool,
    policy: SnapPolicy,
    stats: CacheStats,
}

impl RenderCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new(policy: SnapPolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Snap policy in use.
    #[must_use]
    pub fn policy(&self) -> SnapPolicy {
        self.policy
    }

    /// Sets the snap policy.
    pub fn set_policy(&mut self, policy: SnapPolicy) {
        self.policy = policy;
    }

    /// Returns `true` if paints while snapping must rebuild.
    #[must_use]
    pub fn rebuilds_while_snapping(&self) -> bool {
        self.policy == SnapPolicy::RebuildEveryFrame
    }

    /// Key of the cached raster.
    #[must_use]
    pub fn key(&self) -> Option<CacheKey> {
        self.key
    }

    /// Returns the cached raster, rebuilding it with `build` first if needed.
    ///
    /// The raster is reused when `key` equals the stored key, the cache was not
    /// invalidated, and the caller is not `tracking_snap` under
    /// [`SnapPolicy::RebuildEveryFrame`].
    pub fn get_or_rebuild(
        &mut self,
        key: CacheKey,
        tracking_snap: bool,
        build: impl FnOnce() -> Raster,
    ) -> &Raster {
        let reason = match self.key {
            None => Some(RebuildReason::FirstFrame),
            Some(_) if self.dirty => Some(RebuildReason::Invalidated),
            Some(stored) if stored != key => Some(RebuildReason::KeyChanged),
            Some(_) if tracking_snap && self.rebuilds_while_snapping() => {
                Some(RebuildReason::SnapTracking)
            }
            Some(_) => None,
        };
        match reason {
            Some(reason) => {
                log::debug!("rebuilding raster: {reason}");
                self.raster = build();
                self.key = Some(key);
                self.dirty = false;
                self.stats.rebuilds += 1;
                self.stats.last_reason = Some(reason);
            }
            None => self.stats.hits += 1,
        }
        &self.raster
    }

    /// The cached raster, if one was built.
    #[must_use]
    pub fn raster(&self) -> Option<&Raster> {
        self.key.map(|_| &self.raster)
    }

    /// Forces the next [`RenderCache::get_or_rebuild`] to rebuild.
    ///
    /// Needed whenever the content changes without the view parameters
    /// changing, e.g. after the signal order was edited.
    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Drops the cached raster and its key.
    pub fn clear(&mut self) {
        self.raster = Raster::default();
        self.key = None;
        self.dirty = false;
    }

    /// Hit and rebuild counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;

    fn key(scroll_x: u64) -> CacheKey {
        CacheKey {
            scroll: (scroll_x, 0),
            window: (640_f64.to_bits(), 480_f64.to_bits()),
            tick_width: 0.5_f64.to_bits(),
            scale_factor: 1.4_f64.to_bits(),
        }
    }

    #[test]
    fn reuses_raster_for_identical_key() {
        let mut cache = RenderCache::new(SnapPolicy::RebuildEveryFrame);
        let mut builds = 0;
        for _ in 0..3 {
            cache.get_or_rebuild(key(0), false, || {
                builds += 1;
                Raster::empty(Size::new(640.0, 480.0))
            });
        }
        assert_eq!(builds, 1);
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 2,
                rebuilds: 1,
                last_reason: Some(RebuildReason::FirstFrame),
            }
        );
    }

    #[test]
    fn rebuild_reasons() {
        let mut cache = RenderCache::new(SnapPolicy::RebuildEveryFrame);
        let empty = || Raster::empty(Size::ZERO);
        cache.get_or_rebuild(key(0), false, empty);
        cache.get_or_rebuild(key(1), false, empty);
        assert_eq!(cache.stats().last_reason, Some(RebuildReason::KeyChanged));
        cache.invalidate();
        cache.get_or_rebuild(key(1), false, empty);
        assert_eq!(cache.stats().last_reason, Some(RebuildReason::Invalidated));
        cache.get_or_rebuild(key(1), true, empty);
        assert_eq!(cache.stats().last_reason, Some(RebuildReason::SnapTracking));
        assert_eq!(cache.stats().rebuilds, 4);
    }

    #[test]
    fn reuse_policy_keeps_raster_while_snapping() {
        let mut cache = RenderCache::new(SnapPolicy::ReuseCache);
        let empty = || Raster::empty(Size::ZERO);
        cache.get_or_rebuild(key(0), true, empty);
        cache.get_or_rebuild(key(0), true, empty);
        assert_eq!(cache.stats().rebuilds, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn clear_forgets_the_raster() {
        let mut cache = RenderCache::default();
        assert!(cache.raster().is_none());
        cache.get_or_rebuild(key(0), false, || Raster::empty(Size::ZERO));
        assert!(cache.raster().is_some());
        cache.clear();
        assert!(cache.raster().is_none());
        assert_eq!(cache.key(), None);
    }
}
