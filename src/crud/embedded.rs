//! Translator for embedded models
//!
//! Key/value pairs, timers and disposition type parameters only exist nested
//! inside other records. Every remote verb fails locally.

use serde_json::Value;

use super::Crud;
use crate::error::{Five9Error, Result};
use crate::models::ModelKind;
use crate::record::Record;
use crate::remote::Remote;
use crate::wire::Data;

pub struct EmbeddedCrud;

impl Crud for EmbeddedCrud {
    fn create(&self, _remote: &dyn Remote, kind: ModelKind, _data: &Data) -> Result<Value> {
        Err(Five9Error::unsupported(kind.name(), "create"))
    }

    fn search(&self, _remote: &dyn Remote, kind: ModelKind, _filters: &Data) -> Result<Vec<Record>> {
        Err(Five9Error::unsupported(kind.name(), "search"))
    }

    fn write(&self, _remote: &dyn Remote, record: &Record) -> Result<Value> {
        Err(Five9Error::unsupported(record.kind().name(), "write"))
    }

    fn delete(&self, _remote: &dyn Remote, record: &Record) -> Result<Value> {
        Err(Five9Error::unsupported(record.kind().name(), "delete"))
    }
}
