//! Static MIME tables.
//!
//! Both tables are read-only after configuration load: the accepted-upload
//! set (MIME → canonical extension) and the retrieval mapping (extension →
//! MIME, unknown falls back to `application/octet-stream`).

/// Accepted upload content types and their canonical extensions, sorted by
/// MIME type so the `Accept-Post` listing is deterministic.
pub const ACCEPTED_TYPES: &[(&str, &str)] = &[
    ("application/pdf", "pdf"),
    ("image/gif", "gif"),
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("text/html", "html"),
    ("text/plain", "txt"),
];

/// Canonical extension for an accepted content type, `None` if the type is
/// not accepted for upload.
pub fn extension_for_mime(mime: &str) -> Option<&'static str> {
    ACCEPTED_TYPES
        .iter()
        .find(|(accepted, _)| *accepted == mime)
        .map(|(_, ext)| *ext)
}

/// The `Accept-Post` header value: every accepted type exactly once.
pub fn accept_post() -> String {
    let types: Vec<&str> = ACCEPTED_TYPES.iter().map(|(mime, _)| *mime).collect();
    types.join(", ")
}

/// MIME type for a stored file, by lower-cased extension.
pub fn mime_for_filename(filename: &str) -> &'static str {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "txt"          => "text/plain",
        "html" | "htm" => "text/html",
        "png"          => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif"          => "image/gif",
        "pdf"          => "application/pdf",
        _              => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn accept_post_lists_every_accepted_type_exactly_once() {
        let listing = accept_post();
        let seen: Vec<&str> = listing.split(", ").collect();
        let unique: HashSet<&str> = seen.iter().copied().collect();
        assert_eq!(seen.len(), unique.len());
        for (mime, _) in ACCEPTED_TYPES {
            assert_eq!(seen.iter().filter(|t| *t == mime).count(), 1);
        }
    }

    #[test]
    fn extension_mapping_matches_the_accepted_table() {
        assert_eq!(extension_for_mime("text/plain"), Some("txt"));
        assert_eq!(extension_for_mime("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_mime("application/zip"), None);
    }

    #[test]
    fn retrieval_mime_falls_back_to_octet_stream() {
        assert_eq!(mime_for_filename("a.txt"), "text/plain");
        assert_eq!(mime_for_filename("page.HTM"), "text/html");
        assert_eq!(mime_for_filename("photo.jpeg"), "image/jpeg");
        assert_eq!(mime_for_filename("archive.xyz"), "application/octet-stream");
        assert_eq!(mime_for_filename("no_extension"), "application/octet-stream");
    }
}
