use super::Shape;

/// Errors raised while decoding a JSON document into a typed value.
///
/// Decoding is all-or-nothing: the first offending value aborts the decode of the enclosing
/// document. Errors raised below a record field or a sequence element are wrapped in
/// [`SchemaError::InField`] / [`SchemaError::AtIndex`] so the full location is reported.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("Missing required field '{field}' in '{record}'")]
    MissingRequiredField {
        record: &'static str,
        field: &'static str,
    },

    #[error("Unknown value '{value}' for enum '{enum_name}'")]
    UnknownEnumValue {
        enum_name: &'static str,
        value: String,
    },

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: Shape, found: Shape },

    #[error("Number {value} does not fit in {target}")]
    OutOfRange { value: String, target: &'static str },

    #[error(
        "Cannot decode union '{union}' from an object: more than one object-shaped candidate ({})",
        .candidates.join(", ")
    )]
    AmbiguousUnion {
        union: &'static str,
        candidates: Vec<&'static str>,
    },

    #[error("Invalid JSON document: {0}")]
    Syntax(String),

    #[error("In field '{field}' of '{record}': {source}")]
    InField {
        record: &'static str,
        field: &'static str,
        source: Box<SchemaError>,
    },

    #[error("At index {index}: {source}")]
    AtIndex {
        index: usize,
        source: Box<SchemaError>,
    },
}

impl SchemaError {
    /// Returns the innermost error, skipping the location wrappers.
    pub fn root_cause(&self) -> &SchemaError {
        let mut current = self;
        while let SchemaError::InField { source, .. } | SchemaError::AtIndex { source, .. } =
            current
        {
            current = source;
        }
        current
    }

    /// Returns the location of the error inside the document, e.g. `result.message.chat.id`
    /// or `entities[2].type`. Empty when the error was raised at the top level.
    pub fn path(&self) -> String {
        let mut path = String::new();
        let mut current = self;
        loop {
            match current {
                SchemaError::InField { field, source, .. } => {
                    if !path.is_empty() {
                        path.push('.');
                    }
                    path.push_str(field);
                    current = source;
                }
                SchemaError::AtIndex { index, source } => {
                    path.push_str(&format!("[{index}]"));
                    current = source;
                }
                _ => return path,
            }
        }
    }
}
