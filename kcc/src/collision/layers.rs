use num_traits::{One, PrimInt};
use serde::{Deserialize, Serialize};

/// Backing storage for collision layer masks.
pub type LayerBits = u32;

/// Trait implemented by named collision layer enums.
///
/// The enum's discriminant (via `#[repr(u8)]`) determines the bit index.
pub trait CollisionLayer {
    type Storage: PrimInt;

    fn bit_index(&self) -> u8;

    fn mask(&self) -> Self::Storage {
        // NOTE: `bit_index()` must be < number of bits in `Storage`.
        Self::Storage::one() << (self.bit_index() as usize)
    }
}

/// A set of collision layers.
///
/// Used both as the membership of a static body and as the filter of a query:
/// a query sees a body when the two masks share at least one bit.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerSet<T: PrimInt> {
    pub bits: T,
}

/// The mask type used throughout the crate.
pub type LayerMask = LayerSet<LayerBits>;

impl LayerMask {
    pub const ALL: Self = Self { bits: LayerBits::MAX };
    pub const NONE: Self = Self { bits: 0 };
}

impl Default for LayerMask {
    fn default() -> Self {
        Self::ALL
    }
}

impl<T: PrimInt> LayerSet<T> {
    pub fn new(bits: T) -> Self {
        Self { bits }
    }

    pub fn empty() -> Self {
        Self { bits: T::zero() }
    }

    pub fn from_layers<U: CollisionLayer<Storage = T> + Copy>(layers: &[U]) -> Self {
        let mut set = Self::empty();
        set.add_many(layers);
        set
    }

    pub fn add<U: CollisionLayer<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits | layer.mask();
    }

    pub fn remove<U: CollisionLayer<Storage = T>>(&mut self, layer: U) {
        self.bits = self.bits & !layer.mask();
    }

    pub fn has<U: CollisionLayer<Storage = T>>(&self, layer: U) -> bool {
        (self.bits & layer.mask()) != T::zero()
    }

    pub fn add_many<U: CollisionLayer<Storage = T> + Copy>(&mut self, layers: &[U]) {
        for &layer in layers {
            self.add(layer);
        }
    }

    /// True when the two sets share at least one layer.
    pub fn intersects(&self, other: &Self) -> bool {
        (self.bits & other.bits) != T::zero()
    }

    pub fn is_empty(&self) -> bool {
        self.bits == T::zero()
    }
}

/// Declare a named collision layer enum and implement `CollisionLayer` for it.
///
/// Example:
/// ```rust
/// kcc::define_collision_layers!(Layer, u32, {
///     World,
///     Props,
///     Water,
/// });
/// ```
#[macro_export]
macro_rules! define_collision_layers {
    ($name:ident, $storage:ty, { $($variant:ident),* $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $($variant),*
        }

        impl $crate::collision::layers::CollisionLayer for $name {
            type Storage = $storage;

            fn bit_index(&self) -> u8 {
                *self as u8
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    crate::define_collision_layers!(TestLayer, u32, { World, Props, Water });

    #[test]
    fn masks_intersect_only_on_shared_layers() {
        let world = LayerMask::from_layers(&[TestLayer::World]);
        let props_and_water = LayerMask::from_layers(&[TestLayer::Props, TestLayer::Water]);

        assert!(!world.intersects(&props_and_water));
        assert!(LayerMask::ALL.intersects(&world));
        assert!(!LayerMask::NONE.intersects(&LayerMask::ALL));
    }

    #[test]
    fn add_and_remove_toggle_single_bits() {
        let mut set = LayerMask::empty();
        set.add(TestLayer::Water);
        assert!(set.has(TestLayer::Water));
        assert!(!set.has(TestLayer::World));
        assert_eq!(set.bits, 0b100);

        set.remove(TestLayer::Water);
        assert!(set.is_empty());
    }
}
