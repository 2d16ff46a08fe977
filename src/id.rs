use std::borrow::Cow;

/// Returns the identifier of a resource from its self-referential url: the
/// last non-empty path segment, percent-decoded, ignoring scheme, authority,
/// query and fragment.
///
/// `https://swapi.dev/api/films/3/` yields `Some("3")`; a url without any path
/// segment (`https://swapi.dev/`, `""`) yields `None`. A segment that does not
/// decode to UTF-8 is returned as written.
pub fn extract_id(url: &str) -> Option<Cow<'_, str>> {
    let url = url.split(['?', '#']).next().unwrap_or_default();
    let path = match url.find("://") {
        Some(idx) => {
            let rest = &url[idx + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        },
        None => url,
    };
    let segment = path.rsplit('/').find(|seg| !seg.is_empty())?;
    Some(urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment)))
}

/// Base url plus collection name of the remote service.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Endpoint {
    base_url: String,
    resource: String,
}

impl Endpoint {
    pub fn new(base_url: impl Into<String>, resource: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let resource = resource.into().trim_matches('/').to_string();
        Self { base_url, resource }
    }

    /// `<base>/<resource>/`
    pub fn collection_url(&self) -> String {
        format!("{}/{}/", self.base_url, self.resource)
    }

    /// `<base>/<resource>/<id>/`, with `id` percent-encoded.
    pub fn resource_url(&self, id: &str) -> String {
        format!("{}/{}/{}/", self.base_url, self.resource, urlencoding::encode(id))
    }
}
