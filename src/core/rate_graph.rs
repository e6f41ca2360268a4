//! Exchange-rate graph resolution
//!
//! This module provides the `RateGraph`, which holds every known pairwise
//! conversion rate and answers "how many units of `to` is one unit of `from`"
//! by breadth-first search over the graph.
//!
//! # Loading
//!
//! A load replaces the whole graph. Every edge `from -> to` with a positive rate
//! also inserts the reciprocal edge `to -> from`. Within one load the last write
//! to a directed pair wins, whether that write was an explicit edge or a
//! synthesized reciprocal.
//!
//! # Resolution
//!
//! The search returns the product of rates along the first path that reaches
//! the target, i.e. the path with the fewest hops. It does not look for the best
//! rate. Neighbours are visited in currency-code order so the chosen path is
//! deterministic.
//!
//! A missing route is `None`, never a zero rate.

use crate::types::{Currency, LedgerError, Timestamp};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet, VecDeque};
use tracing::debug;

/// A directed, timestamped conversion factor
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateEdge {
    pub from: Currency,
    pub to: Currency,
    pub rate: Decimal,
    #[serde(default)]
    pub timestamp: Timestamp,
}

impl RateEdge {
    pub fn new(from: impl Into<Currency>, to: impl Into<Currency>, rate: Decimal) -> Self {
        RateEdge {
            from: from.into(),
            to: to.into(),
            rate,
            timestamp: 0,
        }
    }
}

/// Directed graph of conversion rates
#[derive(Debug, Clone, Default)]
pub struct RateGraph {
    edges: BTreeMap<Currency, BTreeMap<Currency, Decimal>>,
}

impl RateGraph {
    /// Create an empty graph
    pub fn new() -> Self {
        RateGraph {
            edges: BTreeMap::new(),
        }
    }

    /// Build a graph from a set of edges
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = RateEdge>,
    {
        let mut graph = RateGraph::new();
        graph.load(edges);
        graph
    }

    /// Replace the graph with the given edges
    ///
    /// Non-positive rates are kept as forward edges but get no reciprocal.
    pub fn load<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = RateEdge>,
    {
        self.edges.clear();

        let mut loaded = 0usize;
        for edge in edges {
            self.insert(edge);
            loaded += 1;
        }

        debug!(
            edges = loaded,
            currencies = self.edges.len(),
            "Loaded exchange rates"
        );
    }

    fn insert(&mut self, edge: RateEdge) {
        self.edges
            .entry(edge.from.clone())
            .or_default()
            .insert(edge.to.clone(), edge.rate);

        let reverse = self.edges.entry(edge.to).or_default();
        if edge.rate > Decimal::ZERO {
            if let Some(inverse) = Decimal::ONE.checked_div(edge.rate) {
                reverse.insert(edge.from, inverse);
            }
        }
    }

    /// Effective rate from one currency to another
    ///
    /// # Returns
    ///
    /// * `Some(1)` - If both codes name the same currency, loaded or not
    /// * `Some(rate)` - Product of the rates along the fewest-hop path
    /// * `None` - If no path connects the two currencies
    pub fn rate(&self, from: &Currency, to: &Currency) -> Option<Decimal> {
        if from == to {
            return Some(Decimal::ONE);
        }

        let mut queue = VecDeque::new();
        let mut visited: HashSet<&Currency> = HashSet::new();
        queue.push_back((from, Decimal::ONE));
        visited.insert(from);

        while let Some((current, current_rate)) = queue.pop_front() {
            let Some(neighbours) = self.edges.get(current) else {
                continue;
            };

            for (neighbour, rate) in neighbours {
                if visited.contains(neighbour) {
                    continue;
                }
                // Overflowing products are not traversable
                let Some(path_rate) = current_rate.checked_mul(*rate) else {
                    continue;
                };

                if neighbour == to {
                    return Some(path_rate);
                }
                visited.insert(neighbour);
                queue.push_back((neighbour, path_rate));
            }
        }

        None
    }

    /// Convert an amount between currencies
    ///
    /// A zero amount converts to zero whether or not a route exists.
    pub fn convert(&self, from: &Currency, to: &Currency, amount: Decimal) -> Option<Decimal> {
        if amount.is_zero() {
            return Some(Decimal::ZERO);
        }
        self.rate(from, to)
            .and_then(|rate| amount.checked_mul(rate))
    }

    /// Convert an amount, reporting a missing route as an error
    pub fn try_convert(
        &self,
        from: &Currency,
        to: &Currency,
        amount: Decimal,
    ) -> Result<Decimal, LedgerError> {
        self.convert(from, to, amount)
            .ok_or_else(|| LedgerError::rate_unavailable(from, to))
    }

    /// Number of currencies with at least one incident edge
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Every currency known to the graph, in code order
    pub fn currencies(&self) -> impl Iterator<Item = &Currency> {
        self.edges.keys()
    }
}
