//! Implementation of the graph representation.
//!
//! The _storage_ owns the actual graph state and exposes the id-level
//! operations on it. On top of the storage there is an
//! [encapsulation](crate::graph) that provides additional, higher-level
//! semantics such as attribute handles.
//!
//! The only storage is [`AdjMap`], a map-keyed adjacency list with stable
//! ids. Its operation complexities are:
//!
//! |                | **[AdjMap]** |
//! |----------------|--------------|
//! | add vertex     | _O*(1)_      |
//! | add edge       | _O*(1)_      |
//! | get neighbors  | _O(d)_       |
//! | lookup vertex  | _O(1)_       |
//! | lookup edge    | _O(1)_       |
//! | remove vertex  | _O(d · d')_  |
//! | remove edge    | _O(d)_       |
//! | space          | _O(V + E)_   |
//! | multi edge     | YES          |
//! | stable IDs     | YES          |
//!
//! * _V_ – vertex count
//! * _E_ – edge count
//! * _d_ – vertex degree (_d'_ – degree of a neighbor)
//! * _O*(..)_ – amortized complexity

pub mod adj_map;

#[doc(inline)]
pub use self::adj_map::AdjMap;
