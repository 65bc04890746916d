use crate::spec::types::hw::Byte;
use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The assembled length, then the requested binary size.
    OutputTooLarge(usize, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::OutputTooLarge(len, target) => write!(
                f,
                "Output of {} byte(s) does not fit in a binary of {} byte(s)",
                len, target
            ),
        }
    }
}

/// Zero-pads `bytes` up to `binary_size`, or rejects them if they are already
/// longer. A size of `None` or `Some(0)` leaves the output unconstrained.
pub fn fit(mut bytes: Vec<Byte>, binary_size: Option<usize>) -> Result<Vec<Byte>, Error> {
    let target = match binary_size {
        None | Some(0) => return Ok(bytes),
        Some(target) => target,
    };

    if bytes.len() > target {
        return Err(Error::OutputTooLarge(bytes.len(), target));
    }

    if bytes.len() < target {
        log::info!(
            "padding {} byte(s) of output with {} zero byte(s)",
            bytes.len(),
            target - bytes.len()
        );
        bytes.resize(target, 0);
    }

    Ok(bytes)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn unconstrained() {
        assert_eq!(fit(vec![1, 2, 3], None), Ok(vec![1, 2, 3]));
        assert_eq!(fit(vec![1, 2, 3], Some(0)), Ok(vec![1, 2, 3]));
        assert_eq!(fit(vec![], None), Ok(vec![]));
    }

    #[test]
    fn pads_with_zeros() {
        assert_eq!(fit(vec![0xFF, 0x12], Some(5)), Ok(vec![0xFF, 0x12, 0, 0, 0]));
        assert_eq!(fit(vec![], Some(2)), Ok(vec![0, 0]));
    }

    #[test]
    fn exact_fit_untouched() {
        assert_eq!(fit(vec![7, 8], Some(2)), Ok(vec![7, 8]));
    }

    #[test]
    fn rejects_oversized() {
        assert_eq!(
            fit(vec![1, 2, 3, 4], Some(2)),
            Err(Error::OutputTooLarge(4, 2))
        );
        assert_eq!(fit(vec![1, 2], Some(1)), Err(Error::OutputTooLarge(2, 1)));
    }
}
