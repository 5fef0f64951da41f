use crate::error::ConverterError;
use crate::types::{CollectionFormat, ParameterLocation};
use crate::{
    COLLECTION_FORMAT_FIELD, CONSUMES_FIELD, CONTENT_FIELD, DEFAULT_MEDIA_TYPE, DESCRIPTION_FIELD,
    EXPLODE_FIELD, IN_FIELD, NAME_FIELD, PARAMETERS_FIELD, PATHS_FIELD, REQUEST_BODY_FIELD,
    REQUIRED_FIELD, RESPONSES_FIELD, SCHEMA_FIELD, STYLE_FIELD, VENDOR_EXTENSION_PREFIX,
};
use serde_json::{Map, Value};
use std::str::FromStr;

type ConvertResult = Result<Value, ConverterError>;

/// Operation fields carried over to 3.x unchanged. Everything else on the
/// operation level is either rewritten (`parameters`, `responses`) or dropped
/// (`consumes`, `produces`).
const OPERATION_FIELDS: &[&str] = &[
    "tags",
    "summary",
    "description",
    "externalDocs",
    "operationId",
    "deprecated",
];

/// Parameter fields that stay on the parameter itself in 3.x; all remaining
/// fields describe the parameter's type and move into its `schema`.
const ENVELOPE_FIELDS: &[&str] = &[NAME_FIELD, IN_FIELD, DESCRIPTION_FIELD, REQUIRED_FIELD];

/// Body-parameter fields carried over onto the 3.x `requestBody`.
const REQUEST_BODY_FIELDS: &[&str] = &[DESCRIPTION_FIELD, REQUIRED_FIELD];

/// Checks whether a document key is a vendor extension.
///
/// # Parameters
/// - `key`: The key to check
///
/// # Returns
/// `true` if the key starts with `x-` (case-insensitive), `false` otherwise.
pub(crate) fn is_vendor_extension(key: &str) -> bool {
    key.get(..VENDOR_EXTENSION_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(VENDOR_EXTENSION_PREFIX))
}

/// Copies allow-listed fields from one mapping into another.
///
/// # Parameters
/// - `source`: The mapping to copy from
/// - `destination`: The mapping to copy into
/// - `fields`: Keys to copy when present
/// - `vendor_extensions`: Whether vendor-extension keys are copied as well
fn copy_fields(
    source: &Map<String, Value>,
    destination: &mut Map<String, Value>,
    fields: &[&str],
    vendor_extensions: bool,
) {
    for (key, value) in source {
        if fields.contains(&key.as_str()) || (vendor_extensions && is_vendor_extension(key)) {
            destination.insert(key.clone(), value.clone());
        }
    }
}

fn require_object<'a>(
    context: &str,
    node: &'a Value,
) -> Result<&'a Map<String, Value>, ConverterError> {
    node.as_object()
        .ok_or_else(|| ConverterError::unexpected_type(context, "object", node))
}

fn require_array<'a>(context: &str, node: &'a Value) -> Result<&'a Vec<Value>, ConverterError> {
    node.as_array()
        .ok_or_else(|| ConverterError::unexpected_type(context, "array", node))
}

fn get_as_str<'a>(node: &'a Value, field: &str) -> Result<&'a str, ConverterError> {
    match node.get(field) {
        None => Err(ConverterError::missing_field(field, node)),
        Some(found) => found
            .as_str()
            .ok_or_else(|| ConverterError::unexpected_type(field, "string", found)),
    }
}

/// Converts the `paths` section of an OpenAPI 2.x document into its 3.x form.
///
/// This is the single entry point for whole-document callers; it is
/// equivalent to calling [`convert_paths`] on the document's `paths` field.
/// All other top-level 2.x fields (`info`, `definitions`,
/// `securityDefinitions`, ...) are the caller's responsibility to retain,
/// translate, or drop.
///
/// # Parameters
/// - `document`: The parsed OpenAPI 2.x document
///
/// # Returns
/// The converted `paths` mapping, or a `ConverterError` when the document has
/// no `paths` field or a required field is missing further down.
///
/// # Examples
/// ```rust
/// use serde_json::json;
/// use oas2to3::convert;
///
/// let document = json!({
///     "swagger": "2.0",
///     "paths": {
///         "/users/{name}": {
///             "get": {
///                 "parameters": [
///                     {"name": "name", "in": "path", "required": true, "type": "string"}
///                 ],
///                 "responses": {"200": {"description": "a user"}}
///             }
///         }
///     }
/// });
///
/// let paths = convert(&document).unwrap();
/// assert!(paths["/users/{name}"]["get"]["parameters"][0]["schema"].is_object());
/// ```
pub fn convert(document: &Value) -> ConvertResult {
    match document.get(PATHS_FIELD) {
        None => Err(ConverterError::missing_field(PATHS_FIELD, document)),
        Some(paths) => convert_paths(paths),
    }
}

/// Converts a 2.x paths mapping into its 3.x form.
///
/// Vendor-extension keys copy their value verbatim; every other entry is
/// treated as a path item and converted through [`convert_path`].
pub fn convert_paths(paths: &Value) -> ConvertResult {
    let paths = require_object(PATHS_FIELD, paths)?;
    let mut retval = Map::new();

    for (endpoint, path) in paths {
        if is_vendor_extension(endpoint) {
            retval.insert(endpoint.clone(), path.clone());
        } else {
            retval.insert(endpoint.clone(), convert_path(path)?);
        }
    }
    Ok(Value::Object(retval))
}

/// Converts a single 2.x path item into its 3.x form.
///
/// The shared `parameters` list and vendor-extension keys copy verbatim;
/// every other entry is treated as an operation and converted through
/// [`convert_operation`].
pub fn convert_path(path: &Value) -> ConvertResult {
    let path = require_object("path item", path)?;
    let mut retval = Map::new();

    for (key, value) in path {
        if key == PARAMETERS_FIELD || is_vendor_extension(key) {
            retval.insert(key.clone(), value.clone());
        } else {
            retval.insert(key.clone(), convert_operation(value)?);
        }
    }
    Ok(Value::Object(retval))
}

/// Converts a single 2.x operation into its 3.x form.
///
/// Allow-listed fields and vendor extensions copy verbatim, a `body`
/// parameter (if any) becomes a `requestBody`, the remaining parameters are
/// rewritten, and `responses` copies through unchanged. `consumes` and
/// `produces` are dropped from the operation; `consumes` is only read to pick
/// the request body's media type.
///
/// # Returns
/// The converted operation, or a `ConverterError` when the operation has no
/// `responses` field.
pub fn convert_operation(operation: &Value) -> ConvertResult {
    let fields = require_object("operation", operation)?;
    let mut retval = Map::new();
    copy_fields(fields, &mut retval, OPERATION_FIELDS, true);

    if let Some(parameters) = fields.get(PARAMETERS_FIELD) {
        let request_body = convert_request_body(operation)?;
        if !request_body.is_empty() {
            retval.insert(REQUEST_BODY_FIELD.to_string(), Value::Object(request_body));
        }

        // An operation that declared 'parameters' keeps the key even when
        // every parameter ended up in the request body or was dropped.
        retval.insert(
            PARAMETERS_FIELD.to_string(),
            convert_parameters(parameters)?,
        );
    }

    match fields.get(RESPONSES_FIELD) {
        None => Err(ConverterError::missing_field(RESPONSES_FIELD, operation)),
        Some(responses) => {
            retval.insert(RESPONSES_FIELD.to_string(), responses.clone());
            Ok(Value::Object(retval))
        }
    }
}

/// Derives a 3.x `requestBody` from an operation's `body` parameter.
///
/// The first parameter with `in` equal to `body` is selected; the 2.x schema
/// allows at most one, and any later ones are ignored. Its `description` and
/// `required` fields carry over, and its schema is keyed under the first
/// media type of the operation's `consumes` list, defaulting to `*/*`.
///
/// # Returns
/// The request body mapping, empty when the operation has no `body`
/// parameter. Callers treat an empty mapping as "no request body".
pub fn convert_request_body(operation: &Value) -> Result<Map<String, Value>, ConverterError> {
    let parameters = match operation.get(PARAMETERS_FIELD) {
        None => return Err(ConverterError::missing_field(PARAMETERS_FIELD, operation)),
        Some(parameters) => require_array(PARAMETERS_FIELD, parameters)?,
    };
    let mut retval = Map::new();

    for parameter in parameters {
        let fields = require_object("parameter", parameter)?;
        let location = get_as_str(parameter, IN_FIELD)?;
        if !matches!(
            ParameterLocation::from_str(location),
            Ok(ParameterLocation::Body)
        ) {
            continue;
        }

        copy_fields(fields, &mut retval, REQUEST_BODY_FIELDS, false);

        let media_type = match operation.get(CONSUMES_FIELD).and_then(Value::as_array) {
            Some(mimetypes) if !mimetypes.is_empty() => {
                mimetypes[0].as_str().ok_or_else(|| {
                    ConverterError::unexpected_type(CONSUMES_FIELD, "string", &mimetypes[0])
                })?
            }
            _ => DEFAULT_MEDIA_TYPE,
        };

        let mut media_content = Map::new();
        if let Some(schema) = fields.get(SCHEMA_FIELD) {
            media_content.insert(SCHEMA_FIELD.to_string(), schema.clone());
        }
        let mut content = Map::new();
        content.insert(media_type.to_string(), Value::Object(media_content));
        retval.insert(CONTENT_FIELD.to_string(), Value::Object(content));
        break;
    }

    Ok(retval)
}

/// Converts a 2.x parameter list into its 3.x form.
///
/// Parameters whose location survives as a parameter in 3.x (`query`,
/// `header`, `path`) are rewritten through [`convert_parameter`], preserving
/// their relative order. `body` is reflected on the operation level instead,
/// `formData` has no 3.x parameter counterpart, and unknown locations are
/// dropped without an error.
pub fn convert_parameters(parameters: &Value) -> ConvertResult {
    let parameters = require_array(PARAMETERS_FIELD, parameters)?;
    let mut retval = Vec::new();

    for parameter in parameters {
        let location = get_as_str(parameter, IN_FIELD)?;
        match ParameterLocation::from_str(location) {
            Ok(found) if found.is_backward_compatible() => {
                retval.push(convert_parameter(parameter)?);
            }
            _ => {
                log::debug!("Dropping parameter with location '{}'", location);
            }
        }
    }
    Ok(Value::Array(retval))
}

/// Converts a single 2.x parameter into its 3.x form.
///
/// The `name`, `in`, `description` and `required` fields stay on the
/// parameter, along with its vendor extensions; every other field is a
/// type-constraining field and moves into a nested `schema` mapping, which is
/// attached even when empty. A `collectionFormat`, when present, translates
/// into the 3.x `style`/`explode` fields where an equivalent exists.
///
/// # Returns
/// The converted parameter, or a `ConverterError` when it has no `in` field.
pub fn convert_parameter(parameter: &Value) -> ConvertResult {
    let fields = require_object("parameter", parameter)?;
    let location = ParameterLocation::from_str(get_as_str(parameter, IN_FIELD)?).ok();

    let collection_format = fields
        .get(COLLECTION_FORMAT_FIELD)
        .and_then(Value::as_str)
        .and_then(|format| CollectionFormat::from_str(format).ok());

    let mut retval = Map::new();
    let mut schema = Map::new();
    for (key, value) in fields {
        if key == COLLECTION_FORMAT_FIELD {
            continue;
        }
        if ENVELOPE_FIELDS.contains(&key.as_str()) || is_vendor_extension(key) {
            retval.insert(key.clone(), value.clone());
        } else {
            schema.insert(key.clone(), value.clone());
        }
    }
    retval.insert(SCHEMA_FIELD.to_string(), Value::Object(schema));

    if let (Some(location), Some(format)) = (location, collection_format) {
        match format.style(&location) {
            Some(style) => {
                retval.insert(STYLE_FIELD.to_string(), Value::String(style.name.to_string()));
                if let Some(explode) = style.explode {
                    retval.insert(EXPLODE_FIELD.to_string(), Value::Bool(explode));
                }
            }
            None => {
                log::debug!(
                    "collectionFormat '{}' on a '{}' parameter has no OpenAPI 3.x equivalent",
                    format,
                    location
                );
            }
        }
    }

    Ok(Value::Object(retval))
}
