//! Model fixtures and connection/cleanup helpers shared by the scenario
//! tests. Each fixture is the minimal `Model` implementation needed to
//! exercise one of the documented end-to-end scenarios -- not a showcase
//! of every field kind the engine supports.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};

use redisco::{FieldMeta, Model, ModelMeta, OrmError, ReferenceMeta, RedisClient, Value, ValueKind};

/// Connects to the Redis URL the rest of the workspace's tests use
/// (`REDIS_URL`, falling back to localhost), matching the adapter crate's
/// own test-helper convention.
pub fn test_client() -> RedisClient {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());
    RedisClient::from_url(&url).expect("connect to test redis")
}

/// Deletes every key under `M:*` before a scenario runs, so repeated runs
/// don't inherit ids or index state from a previous one. Test-only: the
/// engine itself never issues `KEYS`.
pub fn flush_model(client: &RedisClient, model: &str) {
    let conn = client.raw();
    let mut conn = conn.lock().unwrap();
    let keys: Vec<String> = redis::cmd("KEYS")
        .arg(format!("{model}*"))
        .query(&mut *conn)
        .unwrap_or_default();
    if !keys.is_empty() {
        let _: i64 = redis::cmd("DEL").arg(&keys).query(&mut *conn).unwrap_or(0);
    }
}

fn expect_string(field: &str, value: Value) -> Result<String, OrmError> {
    match value {
        Value::String(s) => Ok(s),
        other => Err(type_error(field, "string", other)),
    }
}

fn expect_i64(field: &str, value: Value) -> Result<i64, OrmError> {
    match value {
        Value::Integer(i) => Ok(i),
        other => Err(type_error(field, "integer", other)),
    }
}

fn type_error(field: &str, expected: &str, found: Value) -> OrmError {
    OrmError::TypeError {
        field: field.to_string(),
        expected: expected.to_string(),
        found: found.kind().to_string(),
    }
}

/// S1/S2/S3 fixture: `first_name`/`last_name` indexed by default, plus the
/// method-derived `full_name` extra index S2 and S3 filter and sort by.
#[derive(Debug, Clone)]
pub struct Person {
    id: Option<String>,
    pub first_name: String,
    pub last_name: String,
}

impl Person {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Person {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

static PERSON_META: OnceLock<ModelMeta> = OnceLock::new();

impl Model for Person {
    fn meta() -> &'static ModelMeta {
        PERSON_META.get_or_init(|| ModelMeta {
            name: "Person",
            attributes: &[
                FieldMeta::new("first_name", ValueKind::String).indexed(),
                FieldMeta::new("last_name", ValueKind::String).indexed(),
            ],
            lists: &[],
            references: &[],
            extra_indices: &["full_name"],
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "first_name" => Some(Value::String(self.first_name.clone())),
            "last_name" => Some(Value::String(self.last_name.clone())),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), OrmError> {
        match name {
            "first_name" => {
                self.first_name = expect_string(name, value)?;
                Ok(())
            }
            "last_name" => {
                self.last_name = expect_string(name, value)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn list(&self, _name: &str) -> Option<&[String]> {
        None
    }

    fn set_list(&mut self, _name: &str, _values: Vec<String>) {}

    fn extra_index_value(&self, name: &str) -> Option<String> {
        match name {
            "full_name" => Some(self.full_name()),
            _ => None,
        }
    }

    fn from_hydration(
        id: String,
        fields: &HashMap<String, String>,
        _lists: &HashMap<String, Vec<String>>,
    ) -> Result<Self, OrmError> {
        Ok(Person {
            id: Some(id),
            first_name: fields.get("first_name").cloned().unwrap_or_default(),
            last_name: fields.get("last_name").cloned().unwrap_or_default(),
        })
    }
}

/// S4 fixture: `score` is range-indexed; `percent` is a method-derived
/// equality index (`Meta.indices = ('percent',)` in the original).
#[derive(Debug, Clone)]
pub struct Exam {
    id: Option<String>,
    pub score: i64,
    pub total_score: i64,
}

impl Exam {
    pub fn new(score: i64, total_score: i64) -> Self {
        Exam {
            id: None,
            score,
            total_score,
        }
    }

    pub fn percent(&self) -> i64 {
        self.score * 100 / self.total_score
    }
}

static EXAM_META: OnceLock<ModelMeta> = OnceLock::new();

impl Model for Exam {
    fn meta() -> &'static ModelMeta {
        EXAM_META.get_or_init(|| ModelMeta {
            name: "Exam",
            attributes: &[
                FieldMeta::new("score", ValueKind::Integer).indexed(),
                FieldMeta::new("total_score", ValueKind::Integer),
            ],
            lists: &[],
            references: &[],
            extra_indices: &["percent"],
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "score" => Some(Value::Integer(self.score)),
            "total_score" => Some(Value::Integer(self.total_score)),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), OrmError> {
        match name {
            "score" => {
                self.score = expect_i64(name, value)?;
                Ok(())
            }
            "total_score" => {
                self.total_score = expect_i64(name, value)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn list(&self, _name: &str) -> Option<&[String]> {
        None
    }

    fn set_list(&mut self, _name: &str, _values: Vec<String>) {}

    fn extra_index_value(&self, name: &str) -> Option<String> {
        match name {
            "percent" => Some(self.percent().to_string()),
            _ => None,
        }
    }

    fn from_hydration(
        id: String,
        fields: &HashMap<String, String>,
        _lists: &HashMap<String, Vec<String>>,
    ) -> Result<Self, OrmError> {
        Ok(Exam {
            id: Some(id),
            score: fields.get("score").and_then(|s| s.parse().ok()).unwrap_or(0),
            total_score: fields
                .get("total_score")
                .and_then(|s| s.parse().ok())
                .unwrap_or(0),
        })
    }
}

/// S5 fixture: `date` is an indexed `DateTime`, so it backs both the
/// equality index (`filter(date=...)`) and the range index
/// (`zfilter(date__lt=...)`).
#[derive(Debug, Clone)]
pub struct Post {
    id: Option<String>,
    pub name: String,
    pub date: DateTime<Utc>,
}

impl Post {
    pub fn new(name: impl Into<String>, date: DateTime<Utc>) -> Self {
        Post {
            id: None,
            name: name.into(),
            date,
        }
    }
}

static POST_META: OnceLock<ModelMeta> = OnceLock::new();

impl Model for Post {
    fn meta() -> &'static ModelMeta {
        POST_META.get_or_init(|| ModelMeta {
            name: "Post",
            attributes: &[
                FieldMeta::new("name", ValueKind::String).indexed(),
                FieldMeta::new("date", ValueKind::DateTime).indexed(),
            ],
            lists: &[],
            references: &[],
            extra_indices: &[],
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "date" => Some(Value::DateTime(self.date)),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), OrmError> {
        match name {
            "name" => {
                self.name = expect_string(name, value)?;
                Ok(())
            }
            "date" => {
                self.date = match value {
                    Value::DateTime(dt) => dt,
                    other => return Err(type_error(name, "datetime", other)),
                };
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn list(&self, _name: &str) -> Option<&[String]> {
        None
    }

    fn set_list(&mut self, _name: &str, _values: Vec<String>) {}

    fn from_hydration(
        id: String,
        fields: &HashMap<String, String>,
        _lists: &HashMap<String, Vec<String>>,
    ) -> Result<Self, OrmError> {
        let date = match fields.get("date") {
            Some(raw) => match Value::from_storage(ValueKind::DateTime, raw)? {
                Value::DateTime(dt) => dt,
                _ => unreachable!("from_storage(DateTime, _) always yields Value::DateTime"),
            },
            None => Utc::now(),
        };
        Ok(Post {
            id: Some(id),
            name: fields.get("name").cloned().unwrap_or_default(),
            date,
        })
    }
}

/// S6 fixture: the reference target. Deliberately empty, per the scenario.
#[derive(Debug, Clone)]
pub struct Word {
    id: Option<String>,
}

impl Word {
    pub fn new() -> Self {
        Word { id: None }
    }
}

static WORD_META: OnceLock<ModelMeta> = OnceLock::new();

impl Model for Word {
    fn meta() -> &'static ModelMeta {
        WORD_META.get_or_init(|| ModelMeta {
            name: "Word",
            attributes: &[],
            lists: &[],
            references: &[],
            extra_indices: &[],
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn attribute(&self, _name: &str) -> Option<Value> {
        None
    }

    fn set_attribute(&mut self, _name: &str, _value: Value) -> Result<(), OrmError> {
        Ok(())
    }

    fn list(&self, _name: &str) -> Option<&[String]> {
        None
    }

    fn set_list(&mut self, _name: &str, _values: Vec<String>) {}

    fn from_hydration(
        id: String,
        _fields: &HashMap<String, String>,
        _lists: &HashMap<String, Vec<String>>,
    ) -> Result<Self, OrmError> {
        Ok(Word { id: Some(id) })
    }
}

/// S6 fixture: the referencing side. `word_id` is empty for a Character
/// with no Word, matching the scenario's unreferenced `d`.
#[derive(Debug, Clone)]
pub struct Character {
    id: Option<String>,
    pub name: String,
    pub word_id: String,
}

impl Character {
    pub fn new(name: impl Into<String>, word_id: Option<&str>) -> Self {
        Character {
            id: None,
            name: name.into(),
            word_id: word_id.unwrap_or("").to_string(),
        }
    }
}

static CHARACTER_META: OnceLock<ModelMeta> = OnceLock::new();

impl Model for Character {
    fn meta() -> &'static ModelMeta {
        CHARACTER_META.get_or_init(|| ModelMeta {
            name: "Character",
            attributes: &[FieldMeta::new("name", ValueKind::String).indexed()],
            lists: &[],
            references: &[ReferenceMeta::new("word", "word_id", "Word").indexed()],
            extra_indices: &[],
        })
    }

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn attribute(&self, name: &str) -> Option<Value> {
        match name {
            "name" => Some(Value::String(self.name.clone())),
            "word_id" => Some(Value::String(self.word_id.clone())),
            _ => None,
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), OrmError> {
        match name {
            "name" => {
                self.name = expect_string(name, value)?;
                Ok(())
            }
            "word_id" => {
                self.word_id = expect_string(name, value)?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn list(&self, _name: &str) -> Option<&[String]> {
        None
    }

    fn set_list(&mut self, _name: &str, _values: Vec<String>) {}

    fn from_hydration(
        id: String,
        fields: &HashMap<String, String>,
        _lists: &HashMap<String, Vec<String>>,
    ) -> Result<Self, OrmError> {
        Ok(Character {
            id: Some(id),
            name: fields.get("name").cloned().unwrap_or_default(),
            word_id: fields.get("word_id").cloned().unwrap_or_default(),
        })
    }
}
