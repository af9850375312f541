//! Hand-built multipart bodies for monument form tests.

pub const BOUNDARY: &str = "monument-form-boundary";

/// One part of a test form.
pub enum Part<'a> {
    Text(&'a str, &'a str),
    File(&'a str, &'a [u8]),
}

/// Encode `parts` as a `multipart/form-data` body.
pub fn encode(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                        .as_bytes(),
                );
            }
            Part::File(filename, bytes) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"imageUpload\"; \
                         filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(bytes);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// The Customs House in Dublin with the given categories and files.
pub fn customs_house<'a>(
    categories: &[&'a str],
    files: &[(&'a str, &'a [u8])],
) -> Vec<Part<'a>> {
    let mut parts = vec![
        Part::Text("title", "Customs House"),
        Part::Text("description", "Neoclassical customs house on the Liffey"),
        Part::Text("province", "Leinster"),
        Part::Text("county", "Dublin"),
        Part::Text("latitude", "53.3487"),
        Part::Text("longitude", "-6.2536"),
    ];
    parts.extend(categories.iter().map(|&title| Part::Text("category", title)));
    parts.extend(files.iter().map(|&(name, bytes)| Part::File(name, bytes)));
    parts
}
