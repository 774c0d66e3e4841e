//! Arity-specific tuples.
//!
//! Uni/Bi/Tri/Quad tuples share the same shape: positional facts, a
//! lifecycle state and a store. The macro below generates that shared part;
//! the fill operations that widen a tuple are written out per arity.

use std::fmt;

use super::{Tuple, TupleState, TupleStore};

/// Generates the tuple struct, its fact accessors and its `Tuple` impl.
macro_rules! impl_arity_tuple {
    ($(#[$meta:meta])* $tuple:ident, $arity:literal, { $($fact:ident: $ty:ident => $setter:ident),+ }) => {
        $(#[$meta])*
        pub struct $tuple<$($ty,)+ V> {
            $($fact: $ty,)+
            state: TupleState,
            store: TupleStore<V>,
        }

        impl<$($ty,)+ V> $tuple<$($ty,)+ V> {
            /// Creates a tuple in the `Creating` state with `store_size` empty slots.
            pub fn new($($fact: $ty,)+ store_size: usize) -> Self {
                Self {
                    $($fact,)+
                    state: TupleState::Creating,
                    store: TupleStore::with_size(store_size),
                }
            }

            $(
                #[inline]
                pub fn $fact(&self) -> &$ty {
                    &self.$fact
                }

                #[inline]
                pub fn $setter(&mut self, $fact: $ty) {
                    self.$fact = $fact;
                }
            )+

            /// Copies every fact of `other` into this tuple, keeping state and store.
            pub fn copy_facts_from(&mut self, other: &Self)
            where
                $($ty: Clone,)+
            {
                $(self.$fact = other.$fact.clone();)+
            }
        }

        impl<$($ty,)+ V> Tuple for $tuple<$($ty,)+ V> {
            type Value = V;

            const ARITY: usize = $arity;

            #[inline]
            fn state(&self) -> TupleState {
                self.state
            }

            #[inline]
            fn set_state(&mut self, state: TupleState) {
                self.state = state;
            }

            #[inline]
            fn store(&self) -> &TupleStore<V> {
                &self.store
            }

            #[inline]
            fn store_mut(&mut self) -> &mut TupleStore<V> {
                &mut self.store
            }
        }

        impl<$($ty: fmt::Debug,)+ V> fmt::Debug for $tuple<$($ty,)+ V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct(stringify!($tuple))
                    $(.field(stringify!($fact), &self.$fact))+
                    .field("state", &self.state)
                    .field("store_size", &self.store.size())
                    .finish()
            }
        }
    };
}

impl_arity_tuple!(
    /// A tuple of one fact.
    UniTuple, 1, { a: A => set_a }
);

impl_arity_tuple!(
    /// A tuple of two facts.
    BiTuple, 2, { a: A => set_a, b: B => set_b }
);

impl_arity_tuple!(
    /// A tuple of three facts.
    TriTuple, 3, { a: A => set_a, b: B => set_b, c: C => set_c }
);

impl_arity_tuple!(
    /// A tuple of four facts.
    ///
    /// Wider joins are expressed as chained tuples upstream.
    QuadTuple, 4, { a: A => set_a, b: B => set_b, c: C => set_c, d: D => set_d }
);

impl<A: Clone, B, V> BiTuple<A, B, V> {
    /// Refills this tuple from a left uni tuple and a right fact.
    pub fn fill_from<W>(&mut self, left: &UniTuple<A, W>, b: B) {
        self.a = left.a.clone();
        self.b = b;
    }
}

impl<A: Clone, B: Clone, C, V> TriTuple<A, B, C, V> {
    /// Refills this tuple from a left bi tuple and a right fact.
    pub fn fill_from<W>(&mut self, left: &BiTuple<A, B, W>, c: C) {
        self.a = left.a.clone();
        self.b = left.b.clone();
        self.c = c;
    }
}

impl<A: Clone, B: Clone, C: Clone, D, V> QuadTuple<A, B, C, D, V> {
    /// Refills this tuple from a left tri tuple and a right fact.
    pub fn fill_from<W>(&mut self, left: &TriTuple<A, B, C, W>, d: D) {
        self.a = left.a.clone();
        self.b = left.b.clone();
        self.c = left.c.clone();
        self.d = d;
    }
}

impl<A: Clone, B: Clone, C: Clone, D: Clone, V> QuadTuple<A, B, C, D, V> {
    /// Refills this tuple from two bi tuples.
    pub fn fill_from_pair<W, X>(&mut self, left: &BiTuple<A, B, W>, right: &BiTuple<C, D, X>) {
        self.a = left.a.clone();
        self.b = left.b.clone();
        self.c = right.a.clone();
        self.d = right.b.clone();
    }
}
