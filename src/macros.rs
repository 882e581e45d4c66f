/// Builds a [`Data`](crate::Data) tree from a JSON-like literal.
///
/// Objects keep the order of their keys. Anything that is not `null`, `true`,
/// `false`, an array or an object literal goes through `Data::from`; wrap
/// multi-token expressions in parentheses.
///
/// ```rust
/// use dto_serializer::{data, Data, Pagination};
///
/// let page = data!({
///     "items": [{ "id": 1 }, { "id": 2 }],
///     "paginator": (Data::object(Pagination::new(20))),
///     "total": 2
/// });
/// assert!(matches!(page, Data::Map(_)));
/// ```
#[macro_export]
macro_rules! data {
    (null) => {
        $crate::Data::Null
    };

    (true) => {
        $crate::Data::Bool(true)
    };

    (false) => {
        $crate::Data::Bool(false)
    };

    ([]) => {
        $crate::Data::List(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Data::List(vec![$($crate::data!($elem)),*])
    };

    ({}) => {
        $crate::Data::Map($crate::DataMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut map = $crate::DataMap::new();
        $(
            map.insert($key.to_string(), $crate::data!($value));
        )*
        $crate::Data::Map(map)
    }};

    ($other:expr) => {
        $crate::Data::from($other)
    };
}
