mod bson;
mod coercion;
mod macros;
mod oid;
mod ordered;
mod raw;
mod ser;
