//! Operation-level IR.
//!
//! One [`OperationDescriptor`] per (path, method) pair, produced by the
//! operation resolver and consumed by request emission.

use super::types::ResolvedType;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    /// Every recognised method, in path-item scan order.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Options,
        Self::Head,
    ];

    /// Lowercase key as used in path items and emitted requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Delete => "delete",
            Self::Patch => "patch",
            Self::Options => "options",
            Self::Head => "head",
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Self::Get)
    }
}

/// Parameter location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Cookie,
    Header,
}

impl ParamLocation {
    pub fn parse(location: &str) -> Option<Self> {
        match location {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "cookie" => Some(Self::Cookie),
            "header" => Some(Self::Header),
            _ => None,
        }
    }
}

/// Single resolved parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamDescriptor {
    /// Name as declared in the document.
    pub name: String,
    pub required: bool,
    pub ty: ResolvedType,
}

/// Parameters partitioned by location, each in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamGroups {
    pub path: Vec<ParamDescriptor>,
    pub query: Vec<ParamDescriptor>,
    pub cookie: Vec<ParamDescriptor>,
    pub header: Vec<ParamDescriptor>,
}

impl ParamGroups {
    pub fn push(&mut self, location: ParamLocation, param: ParamDescriptor) {
        match location {
            ParamLocation::Path => self.path.push(param),
            ParamLocation::Query => self.query.push(param),
            ParamLocation::Cookie => self.cookie.push(param),
            ParamLocation::Header => self.header.push(param),
        }
    }

    pub fn get(&self, location: ParamLocation) -> &[ParamDescriptor] {
        match location {
            ParamLocation::Path => &self.path,
            ParamLocation::Query => &self.query,
            ParamLocation::Cookie => &self.cookie,
            ParamLocation::Header => &self.header,
        }
    }

    /// Declared names at `location`.
    pub fn names(&self, location: ParamLocation) -> Vec<&str> {
        self.get(location).iter().map(|p| p.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.cookie.is_empty() && self.header.is_empty()
    }
}

/// URL template part
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlPart {
    /// Static string
    Static(String),
    /// Parameter interpolation
    Param(String),
}

/// Normalized API operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationDescriptor {
    /// `operationId` as declared, if any.
    pub operation_id: Option<String>,
    /// Base for generated names: the operationId, or a method/path fallback.
    pub name: String,
    pub method: HttpMethod,
    /// URL path as declared (e.g., "/pets/{petId}")
    pub path: String,
    pub url: Vec<UrlPart>,
    pub params: ParamGroups,
    /// Registry key of the request body type.
    pub request_body: Option<String>,
    /// First media type of the request body.
    pub content_type: Option<String>,
    pub response: ResolvedType,
}
