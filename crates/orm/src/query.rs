//! The query compiler/executor: `ModelSet<T>`.
//!
//! An immutable lazy query descriptor. Every chain method (`filter`,
//! `zfilter_*`, `order`, `limit`) returns a modified clone; nothing touches
//! Redis until a materializing call (`exec`, `get`, `count`, `contains`).
//! Filters and range-filters are kept in `BTreeMap`s rather than
//! insertion-order vectors: that gives "last write wins per field" for
//! free (a repeated key simply overwrites the map entry) and makes
//! temporary key names deterministic regardless of call order, so
//! concurrent identical queries can share a temp key and a later run
//! safely overwrites it.

use std::collections::BTreeMap;
use std::marker::PhantomData;

use redisco_adapter::RedisClient;

use crate::error::OrmError;
use crate::index::equality_aux_key;
use crate::model::Model;
use crate::value::{Value, ValueKind};

/// A range-predicate operator, per `zfilter(field__op=value)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    In,
}

impl ZOp {
    fn name(self) -> &'static str {
        match self {
            ZOp::Lt => "lt",
            ZOp::Le => "le",
            ZOp::Gt => "gt",
            ZOp::Ge => "ge",
            ZOp::Eq => "eq",
            ZOp::In => "in",
        }
    }
}

/// The right-hand side of a range predicate: a single value for
/// `lt`/`le`/`gt`/`ge`/`eq`, or an inclusive `(lo, hi)` pair for `in`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZBound {
    Single(f64),
    Range(f64, f64),
}

impl std::fmt::Display for ZBound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZBound::Single(v) => write!(f, "{v}"),
            ZBound::Range(lo, hi) => write!(f, "{lo}..{hi}"),
        }
    }
}

/// An immutable lazy query bound to model `T`.
pub struct ModelSet<T: Model> {
    client: RedisClient,
    filters: BTreeMap<String, Value>,
    zfilters: BTreeMap<(String, &'static str), ZBound>,
    ordering: Vec<(String, bool)>,
    limit: Option<(isize, isize)>,
    ttl_seconds: Option<usize>,
    _model: PhantomData<fn() -> T>,
}

impl<T: Model> Clone for ModelSet<T> {
    fn clone(&self) -> Self {
        ModelSet {
            client: self.client.clone(),
            filters: self.filters.clone(),
            zfilters: self.zfilters.clone(),
            ordering: self.ordering.clone(),
            limit: self.limit,
            ttl_seconds: self.ttl_seconds,
            _model: PhantomData,
        }
    }
}

impl<T: Model> ModelSet<T> {
    pub(crate) fn new(client: RedisClient) -> Self {
        ModelSet {
            client,
            filters: BTreeMap::new(),
            zfilters: BTreeMap::new(),
            ordering: Vec::new(),
            limit: None,
            ttl_seconds: None,
            _model: PhantomData,
        }
    }

    /// Equality predicate: `field` must be in `_indices`.
    pub fn filter(mut self, field: &str, value: impl Into<Value>) -> Result<Self, OrmError> {
        let meta = T::meta();
        if !meta.indices().iter().any(|indexed| *indexed == field) {
            return Err(OrmError::AttributeNotIndexed(field.to_string()));
        }
        self.filters.insert(field.to_string(), value.into());
        Ok(self)
    }

    fn zfilter(mut self, field: &str, op: ZOp, bound: ZBound) -> Result<Self, OrmError> {
        let meta = T::meta();
        if !meta.zindices().iter().any(|indexed| *indexed == field) {
            return Err(OrmError::AttributeNotIndexed(field.to_string()));
        }
        self.zfilters
            .insert((field.to_string(), op.name()), bound);
        Ok(self)
    }

    pub fn zfilter_lt(self, field: &str, value: f64) -> Result<Self, OrmError> {
        self.zfilter(field, ZOp::Lt, ZBound::Single(value))
    }

    pub fn zfilter_le(self, field: &str, value: f64) -> Result<Self, OrmError> {
        self.zfilter(field, ZOp::Le, ZBound::Single(value))
    }

    pub fn zfilter_gt(self, field: &str, value: f64) -> Result<Self, OrmError> {
        self.zfilter(field, ZOp::Gt, ZBound::Single(value))
    }

    pub fn zfilter_ge(self, field: &str, value: f64) -> Result<Self, OrmError> {
        self.zfilter(field, ZOp::Ge, ZBound::Single(value))
    }

    pub fn zfilter_eq(self, field: &str, value: f64) -> Result<Self, OrmError> {
        self.zfilter(field, ZOp::Eq, ZBound::Single(value))
    }

    /// `field__in=(lo, hi)`, inclusive on both ends.
    pub fn zfilter_in(self, field: &str, lo: f64, hi: f64) -> Result<Self, OrmError> {
        self.zfilter(field, ZOp::In, ZBound::Range(lo, hi))
    }

    /// Appends an ordering entry. A leading `-` means descending. Only the
    /// last entry chained currently takes effect on sorting -- the
    /// documented (if surprising) contract inherited from the source.
    pub fn order(mut self, field: &str) -> Self {
        self.ordering.push(parse_order(field));
        self
    }

    pub fn limit(mut self, count: isize, offset: isize) -> Self {
        self.limit = Some((offset, count));
        self
    }

    /// Opts into `EXPIRE`ing every intermediate key this query creates,
    /// bounding how long abandoned temp keys linger (§9 Design Notes).
    pub fn with_ttl(mut self, seconds: usize) -> Self {
        self.ttl_seconds = Some(seconds);
        self
    }

    /// Executes the compiled query and hydrates every resulting instance,
    /// in materialized order.
    pub fn exec(&self) -> Result<Vec<T>, OrmError> {
        let ids = self.materialize_ids()?;
        let mut out = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(instance) = self.hydrate(&id)? {
                out.push(instance);
            }
        }
        Ok(out)
    }

    /// `__getitem__`: the instance at `index` in materialized order, or
    /// `None` if out of range or its hash has since disappeared.
    pub fn get(&self, index: usize) -> Result<Option<T>, OrmError> {
        let ids = self.materialize_ids()?;
        match ids.get(index) {
            Some(id) => self.hydrate(id),
            None => Ok(None),
        }
    }

    /// `__contains__`: whether `id` is a member of the materialized result.
    pub fn contains(&self, id: &str) -> Result<bool, OrmError> {
        Ok(self.materialize_ids()?.iter().any(|i| i == id))
    }

    /// `__len__` / the Design Notes' trivial `count()`: the cardinality of
    /// the final result, without hydrating any instance.
    pub fn count(&self) -> Result<usize, OrmError> {
        Ok(self.materialize_ids()?.len())
    }

    fn hydrate(&self, id: &str) -> Result<Option<T>, OrmError> {
        hydrate_instance::<T>(&self.client, id)
    }

    /// Runs the full pipeline described in §4.F and returns the final set
    /// of ids, in materialized order (insertion order from `SMEMBERS` when
    /// no ordering/limit was requested -- i.e. unspecified order, same as
    /// the source).
    fn materialize_ids(&self) -> Result<Vec<String>, OrmError> {
        let meta = T::meta();
        let mut current = meta.key().all().as_str().to_string();

        if !self.filters.is_empty() {
            let mut sources = vec![current.clone()];
            for (field, value) in &self.filters {
                sources.push(equality_aux_key(meta, field, &value.to_storage()).into());
            }
            let dest = format!("~{}", sources.join("+"));
            let source_refs: Vec<&str> = sources.iter().map(String::as_str).collect();
            self.client.set().intersection(&dest, &source_refs)?;
            self.maybe_expire(&dest)?;
            current = dest;
        }

        for ((field, op), bound) in &self.zfilters {
            let op = *op;
            let zindex_key = meta.key().zindex(field);
            let ids = match (op, bound) {
                ("lt", ZBound::Single(v)) => self.client.sorted_set().lt(zindex_key.as_str(), *v)?,
                ("le", ZBound::Single(v)) => self.client.sorted_set().le(zindex_key.as_str(), *v)?,
                ("gt", ZBound::Single(v)) => self.client.sorted_set().gt(zindex_key.as_str(), *v)?,
                ("ge", ZBound::Single(v)) => self.client.sorted_set().ge(zindex_key.as_str(), *v)?,
                ("eq", ZBound::Single(v)) => self.client.sorted_set().eq(zindex_key.as_str(), *v)?,
                ("in", ZBound::Range(lo, hi)) => {
                    self.client.sorted_set().between(zindex_key.as_str(), *lo, *hi)?
                }
                _ => unreachable!("zfilter() pairs every op with its matching ZBound variant"),
            };

            let temp_key = format!("~zfilter:{field}:{op}:{bound}");
            if !ids.is_empty() {
                for id in &ids {
                    self.client.set().add(&temp_key, id)?;
                }
                self.maybe_expire(&temp_key)?;
            }
            let dest = format!("~{}+zfilter:{field}:{op}", current.trim_start_matches('~'));
            self.client
                .set()
                .intersection(&dest, &[current.as_str(), temp_key.as_str()])?;
            self.maybe_expire(&dest)?;
            current = dest;
        }

        if let Some((field, descending)) = self.ordering.last() {
            // Method-derived extras (`full_name`, `percent`, ...) carry no
            // declared `ValueKind`, so default them to lexicographic --
            // the source always sorts `ALPHA` regardless of field type,
            // and an ordinary numeric default would break ordering by a
            // string-valued extra index.
            let numeric = T::meta()
                .attribute(field)
                .map(|a| a.kind != ValueKind::String && a.kind != ValueKind::Boolean)
                .unwrap_or(false);
            let dest = format!("{current}#{field}");
            let mut query = redisco_adapter::redis::SortQuery::new(&current, &dest)
                .by(format!("{}:*->{field}", meta.name));
            if !numeric {
                query = query.alpha();
            }
            if *descending {
                query = query.desc();
            }
            if let Some((offset, count)) = self.limit {
                query = query.limit(offset, count);
            }
            query.execute(&self.client.raw())?;
            self.maybe_expire(&dest)?;
            return Ok(self.client.list().members(&dest)?);
        }

        if let Some((offset, count)) = self.limit {
            let dest = format!("{current}#");
            let mut query = redisco_adapter::redis::SortQuery::new(&current, &dest);
            query = query.limit(offset, count);
            query.execute(&self.client.raw())?;
            self.maybe_expire(&dest)?;
            return Ok(self.client.list().members(&dest)?);
        }

        Ok(self.client.set().members(&current)?)
    }

    fn maybe_expire(&self, key: &str) -> Result<(), OrmError> {
        if let Some(seconds) = self.ttl_seconds {
            let conn = self.client.raw();
            let mut conn = conn.lock().unwrap();
            redis::cmd("EXPIRE")
                .arg(key)
                .arg(seconds)
                .query::<i64>(&mut *conn)?;
        }
        Ok(())
    }
}

fn parse_order(field: &str) -> (String, bool) {
    match field.strip_prefix('-') {
        Some(rest) => (rest.to_string(), true),
        None => (field.to_string(), false),
    }
}

/// Hydrates a single instance by id: `HGETALL` plus `LRANGE` for every
/// list field. Shared by `ModelSet::hydrate` and `Manager::get_by_id` so
/// there's exactly one hydration path in the crate.
pub(crate) fn hydrate_instance<T: Model>(
    client: &RedisClient,
    id: &str,
) -> Result<Option<T>, OrmError> {
    let meta = T::meta();
    let instance_key = meta.key().segment(id);
    let fields = client.hash().all(instance_key.as_str())?;
    if fields.is_empty() {
        return Ok(None);
    }
    let mut lists = std::collections::HashMap::new();
    for list_field in meta.lists {
        let values = client
            .list()
            .members(instance_key.segment(list_field.name).as_str())?;
        lists.insert(list_field.name.to_string(), values);
    }
    Ok(Some(T::from_hydration(id.to_string(), &fields, &lists)?))
}
