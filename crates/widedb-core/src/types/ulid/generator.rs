use crate::types::{Ulid, UlidError};
use std::time::{SystemTime, UNIX_EPOCH};

///
/// Generator
///
/// hacked from <https://github.com/dylanhart/ulid-rs/blob/master/src/generator.rs>
/// so that ids minted in the same millisecond still sort in creation order
///

#[derive(Debug, Default)]
pub struct Generator {
    previous: Ulid,
}

impl Generator {
    /// Monotonic ULID generation; increments within the same millisecond.
    pub fn generate(&mut self) -> Result<Ulid, UlidError> {
        let ts = now_millis()?;

        self.generate_at(ts)
    }

    pub(crate) fn generate_at(&mut self, ts: u64) -> Result<Ulid, UlidError> {
        let last_ts = self.previous.timestamp_ms();

        // maybe time went backward, or it is the same ms.
        // increment instead of generating a new random so that it is monotonic
        if ts <= last_ts {
            if let Some(next) = self.previous.increment() {
                self.previous = next;

                return Ok(next);
            }

            return Err(UlidError::GeneratorOverflow);
        }

        let ulid = Ulid::from_parts(ts, rand::random::<u128>());
        self.previous = ulid;

        Ok(ulid)
    }
}

fn now_millis() -> Result<u64, UlidError> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| UlidError::ClockBeforeEpoch)?;

    Ok(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

///
/// TESTS
///
