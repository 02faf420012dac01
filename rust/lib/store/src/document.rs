use serde::{Serialize, de::DeserializeOwned};

/// A record stored in a named collection.
///
/// Ids are assigned by the store on create; `before_create` runs after the
/// id is set and is where store-owned fields (timestamps) get filled.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name, also the KV key namespace.
    const COLLECTION: &'static str;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    fn before_create(&mut self) {}
}

pub(crate) fn collection_prefix<T: Document>() -> String {
    format!("{}/", T::COLLECTION)
}

pub(crate) fn document_key<T: Document>(id: &str) -> String {
    format!("{}/{}", T::COLLECTION, id)
}
