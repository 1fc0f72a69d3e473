use crate::auth::Principal;

use std::{collections::HashMap, sync::Arc};

/// Per-invocation context: the caller identity plus request-scoped data.
///
/// Built fresh by the hosting execution engine for every mutation request
/// and discarded afterwards.
#[derive(Clone)]
pub struct Request {
    principal: Arc<dyn Principal>,
    uploads: HashMap<String, Upload>,
}

impl Request {
    pub fn new(principal: Arc<dyn Principal>) -> Request {
        Request {
            principal,
            uploads: HashMap::new(),
        }
    }

    /// Attach an uploaded file under the token the client submits in the
    /// mutation input.
    pub fn upload(mut self, token: impl Into<String>, upload: Upload) -> Request {
        self.uploads.insert(token.into(), upload);
        self
    }

    pub fn principal(&self) -> &dyn Principal {
        &*self.principal
    }

    /// Look up an uploaded file by its client-submitted token.
    pub fn uploaded_file(&self, token: &str) -> Option<&Upload> {
        self.uploads.get(token)
    }
}

/// Handle to a file received alongside the request.
///
/// Transport (multipart assembly, temporary storage) happens before graft
/// is invoked; this is only the resolved handle.
#[derive(Debug, Clone, PartialEq)]
pub struct Upload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub size: u64,
}

impl Upload {
    pub fn new(file_name: impl Into<String>) -> Upload {
        Upload {
            file_name: file_name.into(),
            content_type: None,
            size: 0,
        }
    }
}
