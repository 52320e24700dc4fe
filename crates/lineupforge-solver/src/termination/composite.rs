//! Composite termination conditions.
//!
//! Uses macro-generated tuple implementations for zero type erasure.

use std::fmt::Debug;

use super::Termination;
use crate::scope::BatchScope;

/// Combines multiple terminations with OR logic (any must terminate).
///
/// # Examples
///
/// ```
/// use std::sync::atomic::AtomicBool;
/// use std::sync::Arc;
/// use lineupforge_solver::termination::{ExternalTermination, OrTermination, TimeTermination};
///
/// // Terminate after 30 seconds OR when cancelled
/// let termination = OrTermination::new((
///     TimeTermination::seconds(30),
///     ExternalTermination::new(Arc::new(AtomicBool::new(false))),
/// ));
/// ```
#[derive(Debug)]
pub struct OrTermination<T>(pub T);

impl<T> OrTermination<T> {
    /// Creates a new OR termination from a tuple of terminations.
    pub fn new(terminations: T) -> Self {
        Self(terminations)
    }
}

/// Generates `Termination` implementations for OR tuples.
macro_rules! impl_or_termination {
    ($($idx:tt: $T:ident),+) => {
        impl<$($T),+> Termination for OrTermination<($($T,)+)>
        where
            $($T: Termination,)+
        {
            fn is_terminated(&self, scope: &BatchScope) -> bool {
                $((self.0).$idx.is_terminated(scope))||+
            }
        }
    };
}

impl_or_termination!(0: T0);
impl_or_termination!(0: T0, 1: T1);
impl_or_termination!(0: T0, 1: T1, 2: T2);
