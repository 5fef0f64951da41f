pub mod converter;
pub mod error;
pub mod types;

pub use converter::convert;

const PATHS_FIELD: &'static str = "paths";
const PARAMETERS_FIELD: &'static str = "parameters";
const RESPONSES_FIELD: &'static str = "responses";
const REQUEST_BODY_FIELD: &'static str = "requestBody";
const CONSUMES_FIELD: &'static str = "consumes";
const CONTENT_FIELD: &'static str = "content";
const SCHEMA_FIELD: &'static str = "schema";
const NAME_FIELD: &'static str = "name";
const IN_FIELD: &'static str = "in";
const DESCRIPTION_FIELD: &'static str = "description";
const REQUIRED_FIELD: &'static str = "required";
const COLLECTION_FORMAT_FIELD: &'static str = "collectionFormat";
const STYLE_FIELD: &'static str = "style";
const EXPLODE_FIELD: &'static str = "explode";
const VENDOR_EXTENSION_PREFIX: &'static str = "x-";
const DEFAULT_MEDIA_TYPE: &'static str = "*/*";
