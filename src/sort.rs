//! Sort Query Builder
//!
//! SORT is the one command assembled in stages. Clauses may be configured in
//! any order; they are always emitted in the order the protocol grammar
//! requires:
//!
//! ```text
//! SORT key [BY pattern] [LIMIT offset count] [GET pattern ...] [ASC|DESC] [ALPHA] [STORE dest]
//! ```
//!
//! ## Lifecycle
//! `Configuring` -> `Executed`. Execution freezes the clauses into a single
//! descriptor; the builder cannot be configured or executed again.

use bytes::Bytes;

use crate::classify;
use crate::client::Client;
use crate::error::{DomainError, ProviderError, Result};
use crate::key::Key;
use crate::network::Connector;
use crate::protocol::{CommandDescriptor, CommandType, ResponseShape};
use crate::value::ObjectCodec;

/// Result ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Configured clauses, independent of the order they were set in
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Clauses {
    by: Option<String>,
    limit: Option<(u64, u64)>,
    get: Vec<String>,
    order: Option<SortOrder>,
    alpha: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Configuring(Clauses),
    Executed,
}

/// Accumulated SORT configuration bound to one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    key: Key,
    state: State,
}

impl SortSpec {
    pub fn new(key: &str) -> Result<Self> {
        Ok(Self {
            key: Key::new(key)?,
            state: State::Configuring(Clauses::default()),
        })
    }

    pub fn key(&self) -> &Key {
        &self.key
    }

    pub fn is_executed(&self) -> bool {
        matches!(self.state, State::Executed)
    }

    /// Weight pattern (`BY`)
    pub fn by(&mut self, pattern: &str) -> Result<&mut Self> {
        let clauses = self.clauses_mut()?;
        let pattern = non_empty("BY pattern", pattern)?;
        if matches!(&clauses.by, Some(existing) if *existing != pattern) {
            return Err(DomainError::ConflictingClause { clause: "BY" }.into());
        }
        clauses.by = Some(pattern);
        Ok(self)
    }

    /// Projection pattern (`GET`); repeatable, duplicates allowed
    pub fn get(&mut self, pattern: &str) -> Result<&mut Self> {
        let clauses = self.clauses_mut()?;
        let pattern = non_empty("GET pattern", pattern)?;
        clauses.get.push(pattern);
        Ok(self)
    }

    /// Result window (`LIMIT`); a later call replaces an earlier one
    pub fn limit(&mut self, offset: u64, count: u64) -> Result<&mut Self> {
        self.clauses_mut()?.limit = Some((offset, count));
        Ok(self)
    }

    /// Explicit ascending order (`ASC`)
    pub fn asc(&mut self) -> Result<&mut Self> {
        self.order(SortOrder::Asc)
    }

    /// Descending order (`DESC`)
    pub fn desc(&mut self) -> Result<&mut Self> {
        self.order(SortOrder::Desc)
    }

    /// Lexicographic comparison (`ALPHA`)
    pub fn alpha(&mut self) -> Result<&mut Self> {
        self.clauses_mut()?.alpha = true;
        Ok(self)
    }

    /// The descriptor execution would produce, without executing
    pub fn descriptor(&self) -> Result<CommandDescriptor> {
        match &self.state {
            State::Configuring(clauses) => Ok(self.build(clauses, None)),
            State::Executed => Err(self.reused()),
        }
    }

    /// Freeze into the final descriptor and enter `Executed`
    pub fn freeze(&mut self) -> Result<CommandDescriptor> {
        let clauses = self.take_clauses()?;
        Ok(self.build(&clauses, None))
    }

    /// Freeze into a `STORE dest` descriptor and enter `Executed`
    pub fn freeze_store(&mut self, destination: &str) -> Result<CommandDescriptor> {
        if self.is_executed() {
            return Err(self.reused());
        }
        let destination = Key::new(destination)?;
        let clauses = self.take_clauses()?;
        Ok(self.build(&clauses, Some(&destination)))
    }

    fn order(&mut self, order: SortOrder) -> Result<&mut Self> {
        let clauses = self.clauses_mut()?;
        if matches!(clauses.order, Some(existing) if existing != order) {
            return Err(DomainError::ConflictingClause { clause: "ASC|DESC" }.into());
        }
        clauses.order = Some(order);
        Ok(self)
    }

    fn clauses_mut(&mut self) -> Result<&mut Clauses> {
        match &mut self.state {
            State::Configuring(clauses) => Ok(clauses),
            State::Executed => Err(ProviderError::SortReused {
                key: self.key.to_string(),
            }
            .into()),
        }
    }

    fn take_clauses(&mut self) -> Result<Clauses> {
        match std::mem::replace(&mut self.state, State::Executed) {
            State::Configuring(clauses) => Ok(clauses),
            State::Executed => Err(self.reused()),
        }
    }

    fn reused(&self) -> crate::error::ClientError {
        ProviderError::SortReused {
            key: self.key.to_string(),
        }
        .into()
    }

    fn build(&self, clauses: &Clauses, store: Option<&Key>) -> CommandDescriptor {
        let shape = match store {
            Some(_) => ResponseShape::Integer,
            None => ResponseShape::MultiBulk,
        };
        let mut builder = CommandDescriptor::builder(CommandType::Sort, shape).key(&self.key);

        if let Some(pattern) = &clauses.by {
            builder = builder.token("BY").arg(pattern.clone());
        }
        if let Some((offset, count)) = clauses.limit {
            builder = builder
                .token("LIMIT")
                .arg(offset.to_string())
                .arg(count.to_string());
        }
        for pattern in &clauses.get {
            builder = builder.token("GET").arg(pattern.clone());
        }
        match clauses.order {
            Some(SortOrder::Asc) => builder = builder.token("ASC"),
            Some(SortOrder::Desc) => builder = builder.token("DESC"),
            None => {}
        }
        if clauses.alpha {
            builder = builder.token("ALPHA");
        }
        if let Some(destination) = store {
            builder = builder.token("STORE").key(destination);
        }

        builder.build()
    }
}

fn non_empty(what: &'static str, pattern: &str) -> Result<String> {
    if pattern.is_empty() {
        return Err(DomainError::EmptyArgument(what).into());
    }
    Ok(pattern.to_string())
}

// =============================================================================
// Client-bound Sort
// =============================================================================

/// A SORT query bound to the client that will execute it
///
/// Holds the client mutably for its whole lifetime, so a query cannot be
/// shared or configured from two places at once.
pub struct Sort<'c, C: Connector, S: ObjectCodec> {
    client: &'c mut Client<C, S>,
    spec: SortSpec,
}

impl<'c, C: Connector, S: ObjectCodec> Sort<'c, C, S> {
    pub(crate) fn new(client: &'c mut Client<C, S>, spec: SortSpec) -> Self {
        Self { client, spec }
    }

    pub fn spec(&self) -> &SortSpec {
        &self.spec
    }

    pub fn by(&mut self, pattern: &str) -> Result<&mut Self> {
        self.spec.by(pattern)?;
        Ok(self)
    }

    pub fn get(&mut self, pattern: &str) -> Result<&mut Self> {
        self.spec.get(pattern)?;
        Ok(self)
    }

    pub fn limit(&mut self, offset: u64, count: u64) -> Result<&mut Self> {
        self.spec.limit(offset, count)?;
        Ok(self)
    }

    pub fn asc(&mut self) -> Result<&mut Self> {
        self.spec.asc()?;
        Ok(self)
    }

    pub fn desc(&mut self) -> Result<&mut Self> {
        self.spec.desc()?;
        Ok(self)
    }

    pub fn alpha(&mut self) -> Result<&mut Self> {
        self.spec.alpha()?;
        Ok(self)
    }

    /// Execute and return the results in server order
    pub fn exec(&mut self) -> Result<SortResults> {
        let descriptor = self.spec.freeze()?;
        let raw = self.client.dispatch(&descriptor)?;
        Ok(SortResults::new(classify::elements(descriptor.name(), raw)?))
    }

    /// Execute with `STORE destination`; returns the number of stored elements
    pub fn store(&mut self, destination: &str) -> Result<u64> {
        let descriptor = self.spec.freeze_store(destination)?;
        let raw = self.client.dispatch(&descriptor)?;
        classify::count(descriptor.name(), raw)
    }
}

/// SORT results, consumed once in server order
///
/// Elements are `None` where a GET pattern named a missing key.
#[derive(Debug)]
pub struct SortResults {
    items: std::vec::IntoIter<Option<Bytes>>,
}

impl SortResults {
    fn new(items: Vec<Option<Bytes>>) -> Self {
        Self {
            items: items.into_iter(),
        }
    }
}

impl Iterator for SortResults {
    type Item = Option<Bytes>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl ExactSizeIterator for SortResults {}
