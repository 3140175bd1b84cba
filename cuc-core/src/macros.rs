// Builds an `Option<BTreeMap<String, String>>` suitable for an object's labels or annotations
#[macro_export]
macro_rules! klabel {
    ($($key:tt => $val:expr),+$(,)?) => {
        Some(BTreeMap::from([$(($key.to_string(), $val.to_string())),+]))
    };
}

pub use std::collections::BTreeMap;

pub use klabel;
