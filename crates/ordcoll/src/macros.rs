/// Build a [`Collection`](crate::Collection) literal.
///
/// ```
/// use ordcoll::collection;
///
/// let list = collection![1, 2, 3];
/// let map = collection! {"a" => 1, 5 => "five"};
/// assert!(list.is_list());
/// assert_eq!(map.count(), 2);
/// ```
#[macro_export]
macro_rules! collection {
    () => {
        $crate::Collection::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut c = $crate::Collection::new();
        $(
            c.insert($crate::Key::from($key), $crate::Value::from($value));
        )+
        c
    }};
    ($($value:expr),+ $(,)?) => {{
        let mut c = $crate::Collection::new();
        $(
            c.push($crate::Value::from($value));
        )+
        c
    }};
}
