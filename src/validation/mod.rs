use crate::models::{NoteFormValues, NoteTag, RawNoteFields};

pub(crate) const TITLE_MIN: usize = 3;
pub(crate) const TITLE_MAX: usize = 50;
pub(crate) const CONTENT_MAX: usize = 500;

/// One message per failing field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct FieldErrors {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tag: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tag.is_none()
    }
}

// Lengths are UTF-16 code units, which is how the notes API counts them.
fn len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn check_title(title: &str) -> Option<String> {
    let n = len(title);
    if n == 0 {
        Some("Title is required".to_string())
    } else if n < TITLE_MIN {
        Some(format!("Title must be at least {TITLE_MIN} characters"))
    } else if n > TITLE_MAX {
        Some(format!("Title must be at most {TITLE_MAX} characters"))
    } else {
        None
    }
}

fn check_content(content: &str) -> Option<String> {
    (len(content) > CONTENT_MAX)
        .then(|| format!("Content must be at most {CONTENT_MAX} characters"))
}

fn check_tag(tag: &str) -> Result<NoteTag, String> {
    if tag.is_empty() {
        return Err("Tag is required".to_string());
    }
    tag.parse::<NoteTag>().map_err(|_| "Invalid tag".to_string())
}

/// Validate the form fields into the create-note payload.
pub(crate) fn validate(fields: &RawNoteFields) -> Result<NoteFormValues, FieldErrors> {
    let tag = check_tag(&fields.tag);
    let errors = FieldErrors {
        title: check_title(&fields.title),
        content: check_content(&fields.content),
        tag: tag.as_ref().err().cloned(),
    };

    match tag {
        Ok(tag) if errors.is_empty() => Ok(NoteFormValues {
            title: fields.title.clone(),
            content: fields.content.clone(),
            tag,
        }),
        _ => Err(errors),
    }
}
