//! Node numbering shared by every part of the formulation.
//!
//! With `P` passengers and `D` drivers the `N = 2(D + P)` nodes are laid out
//! as pickups `[0, P)`, drop-offs `[P, 2P)`, origins `[2P, 2P + D)` and
//! destinations `[2P + D, N)`.

use std::fmt;

/// What a node stands for, with the passenger or driver it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    Pickup(usize),
    Dropoff(usize),
    Origin(usize),
    Destination(usize),
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Pickup(i) => write!(f, "pickup of passenger {i}"),
            NodeRole::Dropoff(i) => write!(f, "drop-off of passenger {i}"),
            NodeRole::Origin(k) => write!(f, "origin of driver {k}"),
            NodeRole::Destination(k) => write!(f, "destination of driver {k}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIndexer {
    n_drivers: usize,
    n_passengers: usize,
}

impl NodeIndexer {
    pub fn new(n_drivers: usize, n_passengers: usize) -> Self {
        Self {
            n_drivers,
            n_passengers,
        }
    }

    pub fn n_drivers(&self) -> usize {
        self.n_drivers
    }

    pub fn n_passengers(&self) -> usize {
        self.n_passengers
    }

    /// `N = 2(D + P)`.
    pub fn node_count(&self) -> usize {
        2 * (self.n_drivers + self.n_passengers)
    }

    /// Pickup and drop-off nodes occupy `[0, 2P)`.
    pub fn service_node_count(&self) -> usize {
        2 * self.n_passengers
    }

    pub fn pickup(&self, passenger: usize) -> usize {
        passenger
    }

    pub fn dropoff(&self, passenger: usize) -> usize {
        self.n_passengers + passenger
    }

    pub fn origin(&self, driver: usize) -> usize {
        2 * self.n_passengers + driver
    }

    pub fn destination(&self, driver: usize) -> usize {
        2 * self.n_passengers + self.n_drivers + driver
    }

    pub fn is_pickup(&self, node: usize) -> bool {
        node < self.n_passengers
    }

    pub fn is_dropoff(&self, node: usize) -> bool {
        (self.n_passengers..2 * self.n_passengers).contains(&node)
    }

    pub fn is_service(&self, node: usize) -> bool {
        node < self.service_node_count()
    }

    pub fn is_origin(&self, node: usize) -> bool {
        let first = 2 * self.n_passengers;
        (first..first + self.n_drivers).contains(&node)
    }

    pub fn is_destination(&self, node: usize) -> bool {
        let first = 2 * self.n_passengers + self.n_drivers;
        (first..first + self.n_drivers).contains(&node)
    }

    /// Inverse of the four mappings; `None` outside `[0, N)`.
    pub fn role(&self, node: usize) -> Option<NodeRole> {
        let p = self.n_passengers;
        let d = self.n_drivers;
        match node {
            n if n < p => Some(NodeRole::Pickup(n)),
            n if n < 2 * p => Some(NodeRole::Dropoff(n - p)),
            n if n < 2 * p + d => Some(NodeRole::Origin(n - 2 * p)),
            n if n < 2 * (p + d) => Some(NodeRole::Destination(n - 2 * p - d)),
            _ => None,
        }
    }

    /// Seat change when a vehicle visits `node`: `+1` at pickups, `-1` at
    /// drop-offs, `0` at driver terminals.
    pub fn node_load(&self, node: usize) -> i32 {
        if self.is_pickup(node) {
            1
        } else if self.is_dropoff(node) {
            -1
        } else {
            0
        }
    }

    /// Whether driver `k` may never use arc `i -> j`.
    ///
    /// Self-loops, arcs into any origin and arcs out of any destination are
    /// forbidden for everyone. Terminals are private, so driver `k` also may
    /// not leave another driver's origin or enter another driver's
    /// destination.
    pub fn is_forbidden_arc(&self, i: usize, j: usize, k: usize) -> bool {
        i == j
            || self.is_origin(j)
            || self.is_destination(i)
            || (self.is_origin(i) && i != self.origin(k))
            || (self.is_destination(j) && j != self.destination(k))
    }

    /// All node indices.
    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.node_count()
    }

    pub fn service_nodes(&self) -> std::ops::Range<usize> {
        0..self.service_node_count()
    }
}
