mod ulid;

pub(crate) use self::ulid::generator::Generator;
pub use self::ulid::{Ulid, UlidDecodeError, UlidError};
