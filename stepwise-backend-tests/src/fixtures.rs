mod download;
mod errors;
mod get_json;
