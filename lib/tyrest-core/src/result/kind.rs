use std::fmt::Debug;

mod sealed {
    pub trait Sealed {}
}

/// Tags an [`ApiResult`](super::ApiResult) with the shape of the call that produced it.
///
/// Kinds are zero-sized markers: they carry no data and never influence the
/// failure side of a result. They only select which payload accessor is
/// available on a successful result.
pub trait ResultKind: sealed::Sealed + Debug + Clone + Copy + PartialEq + Send + Sync + 'static {
    /// Short, human-readable name of the kind, shown in the `Debug` output of a result.
    const NAME: &'static str;
}

macro_rules! result_kind {
    ($(#[$meta:meta])* $kind:ident, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
        pub struct $kind;

        impl sealed::Sealed for $kind {}

        impl ResultKind for $kind {
            const NAME: &'static str = $name;
        }
    };
}

result_kind!(
    /// An entity read from the service (`GET`).
    Retrieve,
    "retrieve"
);
result_kind!(
    /// An entity returned by a write (`POST`).
    Create,
    "create"
);
result_kind!(
    /// An entity returned by an update (`PATCH`, `PUT`).
    Modify,
    "modify"
);
result_kind!(
    /// An entity returned by a removal (`DELETE`).
    Delete,
    "delete"
);
result_kind!(
    /// A call without payload, only success or failure matters.
    Operation,
    "operation"
);
