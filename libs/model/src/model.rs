//! Entities: attribute maps bound to a document kind and its query builder.

use crate::error::{Error, Result};
use crate::forward::Queryable;
use crate::kind::DocumentKind;
use esorm_query::{Document, QueryBuilder, QueryOutput, RangeMode, SearchService};
use serde::de::DeserializeOwned;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value as JsonValue};
use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;
use std::sync::Arc;

/// Collapsed groups keyed by inner-hit name.
pub type Collapsed<K> = BTreeMap<String, Vec<Model<K>>>;

/// One document of kind `K`, plus the query builder used to fetch more of them.
pub struct Model<K: DocumentKind> {
    id: Option<String>,
    attributes: Map<String, JsonValue>,
    collapsed: Collapsed<K>,
    builder: QueryBuilder,
    kind: PhantomData<fn() -> K>,
}

impl<K: DocumentKind> Model<K> {
    /// An empty entity, ready to build a query against `K`'s index.
    pub fn new(service: Arc<dyn SearchService>) -> Self {
        Self::with_attributes(service, Map::new())
    }

    pub fn with_attributes(
        service: Arc<dyn SearchService>,
        attributes: Map<String, JsonValue>,
    ) -> Self {
        Self {
            id: None,
            attributes,
            collapsed: BTreeMap::new(),
            builder: QueryBuilder::for_index(service, K::index_name()),
            kind: PhantomData,
        }
    }

    /// Choose how repeated range bounds on one field combine. Entities mapped
    /// from this one's results inherit the mode.
    pub fn with_range_mode(mut self, range_mode: RangeMode) -> Self {
        self.builder.set_range_mode(range_mode);
        self
    }

    pub fn range_mode(&self) -> RangeMode {
        self.builder.range_mode()
    }

    /// Index this kind of document lives in.
    pub fn index_name(&self) -> String {
        K::index_name()
    }

    /// Engine id, when the entity came from a response.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    // ----------------------------------------------------------------------
    // Execution
    // ----------------------------------------------------------------------

    /// Run the accumulated query and map every hit into an entity.
    pub async fn get(&mut self) -> Result<Vec<Self>> {
        let output = self.builder.get().await?;
        match output {
            QueryOutput::Documents(documents) => Ok(documents
                .into_iter()
                .map(|document| self.map_document(document))
                .collect()),
            QueryOutput::Buckets(_) => Err(Error::UnsupportedOperation {
                entity: K::index_name(),
                operation: "get() with aggregations (run it on the builder returned by aggr())"
                    .into(),
            }),
        }
    }

    pub async fn find(&mut self, id: impl ToString) -> Result<Option<Self>> {
        let document = self.builder.find(id).await?;
        Ok(document.map(|document| self.map_document(document)))
    }

    /// Found documents only, in engine order.
    pub async fn find_many<I, T>(&mut self, ids: I) -> Result<Vec<Self>>
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        let documents = self.builder.find_many(ids).await?;
        let requested = documents.len();
        let models: Vec<Self> = documents
            .into_iter()
            .filter(Document::is_found)
            .map(|document| self.map_document(document))
            .collect();

        tracing::debug!(
            index = %K::index_name(),
            requested,
            found = models.len(),
            "mapped multi-get result"
        );
        Ok(models)
    }

    pub async fn count(&mut self) -> Result<u64> {
        Ok(self.builder.count().await?)
    }

    fn map_document(&self, document: Document) -> Self {
        let service = Arc::clone(self.builder.service());
        let mut model = Self::with_attributes(service, document.source);
        model.builder.set_range_mode(self.builder.range_mode());
        model.id = document.id;

        for (name, group) in document.inner_hits {
            let children = group
                .hits
                .hits
                .into_iter()
                .map(|child| self.map_document(child))
                .collect();
            model.add_collapsed(name, children);
        }

        model
    }

    // ----------------------------------------------------------------------
    // Collapsed groups
    // ----------------------------------------------------------------------

    pub(crate) fn add_collapsed(&mut self, name: String, group: Vec<Self>) {
        self.collapsed.insert(name, group);
    }

    /// Documents collapsed under `name`, in inner-hit order.
    pub fn collapsed(&self, name: &str) -> Option<&[Self]> {
        self.collapsed.get(name).map(Vec::as_slice)
    }

    pub fn all_collapsed(&self) -> &Collapsed<K> {
        &self.collapsed
    }

    // ----------------------------------------------------------------------
    // Attributes
    // ----------------------------------------------------------------------

    pub fn attribute(&self, name: &str) -> Option<&JsonValue> {
        self.attributes.get(name)
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<JsonValue>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Key membership; a present `null` still counts.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<JsonValue> {
        self.attributes.remove(name)
    }

    pub fn attributes(&self) -> &Map<String, JsonValue> {
        &self.attributes
    }

    /// Decode the attributes into a typed struct.
    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_value(JsonValue::Object(self.attributes.clone()))?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K: DocumentKind> Queryable for Model<K> {
    fn query_builder(&mut self) -> &mut QueryBuilder {
        &mut self.builder
    }
}

/// Missing attributes index as `null`.
impl<K: DocumentKind> Index<&str> for Model<K> {
    type Output = JsonValue;

    fn index(&self, name: &str) -> &JsonValue {
        static NULL: JsonValue = JsonValue::Null;
        self.attributes.get(name).unwrap_or(&NULL)
    }
}

impl<K: DocumentKind> Serialize for Model<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Model", 2)?;
        state.serialize_field("attributes", &self.attributes)?;
        state.serialize_field("collapsed", &self.collapsed)?;
        state.end()
    }
}

impl<K: DocumentKind> fmt::Debug for Model<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("index", &K::index_name())
            .field("id", &self.id)
            .field("attributes", &self.attributes)
            .field("collapsed", &self.collapsed)
            .finish_non_exhaustive()
    }
}
