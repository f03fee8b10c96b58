//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types.

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around an integer type with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `PartialOrd`, `Ord`, `Hash`
/// - Conversion methods: `new()`, `get()`
/// - `Display`, `FromStr`, and `From` conversions to and from the inner type
///
/// # Example
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(CouponId, u32);
/// define_id!(ReviewId, u32);
///
/// let coupon_id = CouponId::new(1);
/// let review_id = ReviewId::new(1);
///
/// // These are different types, so this won't compile:
/// // let _: CouponId = review_id;
/// # let _ = (coupon_id, review_id);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $inner:ty) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            /// Create a new ID from its raw value.
            #[must_use]
            pub const fn new(id: $inner) -> Self {
                Self(id)
            }

            /// Get the underlying raw value.
            #[must_use]
            pub const fn get(&self) -> $inner {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::core::num::ParseIntError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                s.trim().parse::<$inner>().map(Self)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Catalog products are numbered from 1.
define_id!(ProductId, u32);

// Orders are keyed by their placement time in Unix milliseconds.
define_id!(OrderId, i64);

impl OrderId {
    /// The smallest ID strictly greater than `self`.
    ///
    /// Used to keep order IDs increasing when two orders land on the same
    /// millisecond.
    #[must_use]
    pub const fn successor(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}
