//! PostgreSQL functions used by the repositories.

use diesel::define_sql_function;
use diesel::sql_types::{Array, Integer, Uuid};

define_sql_function! {
    /// `array_append(anyarray, anyelement)`.
    fn array_append(array: Array<Uuid>, element: Uuid) -> Array<Uuid>;
}

define_sql_function! {
    /// `array_remove(anyarray, anyelement)`.
    fn array_remove(array: Array<Uuid>, element: Uuid) -> Array<Uuid>;
}

define_sql_function! {
    fn greatest(a: Integer, b: Integer) -> Integer;
}
