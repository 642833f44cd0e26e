//! Object Identifier (OID) type.
//!
//! Arcs live in a `SmallVec<[u32; 16]>`, so the OIDs found in typical
//! variable bindings never touch the heap.

use crate::error::{DecodeErrorKind, Error, OidErrorKind, Result};
use smallvec::SmallVec;
use std::fmt;

/// Maximum number of arcs (subidentifiers) allowed in an OID.
///
/// RFC 2578 Section 3.5 caps a value at 128 sub-identifiers. [`Oid::from_ber`]
/// enforces the cap; [`Oid::validate_length`] checks OIDs built in code.
pub const MAX_OID_LEN: usize = 128;

/// Object Identifier.
///
/// Constructors accept any arcs. Only OIDs that pass [`validate`](Self::validate)
/// survive a trip through BER unchanged; others still encode, but the
/// shared first subidentifier decodes back to different leading arcs.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Oid {
    arcs: SmallVec<[u32; 16]>,
}

impl Oid {
    /// Create an empty OID.
    pub fn empty() -> Self {
        Self {
            arcs: SmallVec::new(),
        }
    }

    /// Create an OID from arc values.
    ///
    /// ```
    /// use snmp_pdu::oid::Oid;
    ///
    /// let oid = Oid::new([1, 3, 6, 1, 2, 1]);
    /// assert_eq!(oid.len(), 6);
    /// ```
    pub fn new(arcs: impl IntoIterator<Item = u32>) -> Self {
        Self {
            arcs: arcs.into_iter().collect(),
        }
    }

    /// Create an OID from a slice of arcs.
    pub fn from_slice(arcs: &[u32]) -> Self {
        Self {
            arcs: SmallVec::from_slice(arcs),
        }
    }

    /// Parse dotted notation such as `"1.3.6.1.2.1.1.1.0"`.
    ///
    /// A leading dot is tolerated. Arc constraints are not checked here;
    /// call [`validate`](Self::validate) for that.
    ///
    /// ```
    /// use snmp_pdu::oid::Oid;
    ///
    /// let oid = Oid::parse(".1.3.6.1.2.1.1.5.0").unwrap();
    /// assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.5.0");
    /// assert!(Oid::parse("1.3.x").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let trimmed = s.strip_prefix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::empty());
        }

        trimmed
            .split('.')
            .map(|part| {
                part.parse::<u32>()
                    .map_err(|_| Error::invalid_oid_with_input(OidErrorKind::InvalidArc, s))
            })
            .collect::<Result<SmallVec<_>>>()
            .map(|arcs| Self { arcs })
    }

    /// Get the arc values.
    pub fn arcs(&self) -> &[u32] {
        &self.arcs
    }

    /// Get the number of arcs.
    pub fn len(&self) -> usize {
        self.arcs.len()
    }

    /// Check if the OID is empty.
    pub fn is_empty(&self) -> bool {
        self.arcs.is_empty()
    }

    /// True if `other` is a prefix of `self` (including equality).
    pub fn starts_with(&self, other: &Oid) -> bool {
        self.arcs.starts_with(&other.arcs)
    }

    /// The OID with one more arc appended.
    pub fn child(&self, arc: u32) -> Oid {
        let mut arcs = self.arcs.clone();
        arcs.push(arc);
        Oid { arcs }
    }

    /// Check the first two arcs against X.690 Section 8.19.4.
    ///
    /// The first arc must be 0, 1 or 2. Under 0 and 1 the second arc must
    /// be below 40. A non-empty OID needs at least two arcs.
    pub fn validate(&self) -> Result<()> {
        match self.arcs.as_slice() {
            [first, ..] if *first > 2 => {
                Err(Error::invalid_oid(OidErrorKind::InvalidFirstArc(*first)))
            }
            [_] => Err(Error::invalid_oid(OidErrorKind::SingleArc)),
            [first, second, ..] if *first < 2 && *second >= 40 => {
                Err(Error::invalid_oid(OidErrorKind::InvalidSecondArc {
                    first: *first,
                    second: *second,
                }))
            }
            _ => Ok(()),
        }
    }

    /// Check the arc count against [`MAX_OID_LEN`].
    pub fn validate_length(&self) -> Result<()> {
        if self.arcs.len() > MAX_OID_LEN {
            return Err(Error::invalid_oid(OidErrorKind::TooManyArcs {
                count: self.arcs.len(),
                max: MAX_OID_LEN,
            }));
        }
        Ok(())
    }

    /// BER content octets for this OID.
    ///
    /// The first two arcs share one subidentifier (`arc1 * 40 + arc2`),
    /// the rest are base-128 with continuation bits. The shared value is
    /// computed in 64 bits, so `2.4294967295` encodes without wrapping.
    ///
    /// A single arc encodes as `arc1 * 40`. That and any OID failing
    /// [`validate`](Self::validate) decodes to different arcs: `1` comes
    /// back as `1.0`, `5.3` as `2.123`.
    pub fn to_ber_smallvec(&self) -> SmallVec<[u8; 64]> {
        let mut bytes = SmallVec::new();

        let (first, rest) = match self.arcs.as_slice() {
            [] => return bytes,
            [a] => (u64::from(*a) * 40, &[][..]),
            [a, b, rest @ ..] => (u64::from(*a) * 40 + u64::from(*b), rest),
        };

        push_subidentifier(&mut bytes, first);
        for &arc in rest {
            push_subidentifier(&mut bytes, u64::from(arc));
        }
        bytes
    }

    /// BER content octets as a `Vec`.
    pub fn to_ber(&self) -> Vec<u8> {
        self.to_ber_smallvec().to_vec()
    }

    /// Size of the full OBJECT IDENTIFIER TLV.
    pub fn ber_encoded_len(&self) -> usize {
        let content = self.to_ber_smallvec().len();
        1 + crate::ber::length_encoded_len(content) + content
    }

    /// Decode BER content octets.
    ///
    /// Error offsets are relative to `data`.
    pub fn from_ber(data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Ok(Self::empty());
        }

        let mut arcs = SmallVec::new();
        let (first, mut i) = read_subidentifier(data, 0, MAX_FIRST_SUBIDENTIFIER)?;
        // Both casts are bounded by MAX_FIRST_SUBIDENTIFIER.
        match first {
            0..=39 => arcs.extend([0, first as u32]),
            40..=79 => arcs.extend([1, (first - 40) as u32]),
            _ => arcs.extend([2, (first - 80) as u32]),
        }

        while i < data.len() {
            let (arc, next) = read_subidentifier(data, i, u64::from(u32::MAX))?;
            arcs.push(arc as u32);
            if arcs.len() > MAX_OID_LEN {
                return Err(Error::malformed(
                    i,
                    DecodeErrorKind::OidTooLong {
                        count: arcs.len(),
                        max: MAX_OID_LEN,
                    },
                ));
            }
            i = next;
        }

        Ok(Self { arcs })
    }
}

/// Largest first subidentifier: `2.4294967295`.
const MAX_FIRST_SUBIDENTIFIER: u64 = 80 + u32::MAX as u64;

fn push_subidentifier(bytes: &mut SmallVec<[u8; 64]>, value: u64) {
    let groups = ((64 - value.leading_zeros()).max(1)).div_ceil(7);
    for i in (0..groups).rev() {
        let mut byte = ((value >> (i * 7)) & 0x7F) as u8;
        if i > 0 {
            byte |= 0x80;
        }
        bytes.push(byte);
    }
}

/// Read one base-128 subidentifier starting at `start`, returning the value
/// and the index just past it. Values above `max` are an overflow.
fn read_subidentifier(data: &[u8], start: usize, max: u64) -> Result<(u64, usize)> {
    let mut value: u64 = 0;
    let mut i = start;
    loop {
        let Some(&byte) = data.get(i) else {
            return Err(Error::malformed(i, DecodeErrorKind::InvalidOidEncoding));
        };
        value = (value << 7) | u64::from(byte & 0x7F);
        if value > max {
            return Err(Error::malformed(i, DecodeErrorKind::IntegerOverflow));
        }
        i += 1;
        if byte & 0x80 == 0 {
            return Ok((value, i));
        }
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self)
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.arcs.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{}", first)?;
            for arc in arcs {
                write!(f, ".{}", arc)?;
            }
        }
        Ok(())
    }
}

impl std::str::FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<&[u32]> for Oid {
    fn from(arcs: &[u32]) -> Self {
        Self::from_slice(arcs)
    }
}

impl<const N: usize> From<[u32; N]> for Oid {
    fn from(arcs: [u32; N]) -> Self {
        Self::new(arcs)
    }
}

impl PartialOrd for Oid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Oid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.arcs.cmp(&other.arcs)
    }
}

/// Build an [`Oid`] from literal arcs.
///
/// ```
/// use snmp_pdu::oid;
///
/// let sys_descr = oid!(1, 3, 6, 1, 2, 1, 1, 1, 0);
/// assert_eq!(sys_descr.to_string(), "1.3.6.1.2.1.1.1.0");
/// assert!(sys_descr.starts_with(&oid!(1, 3, 6, 1, 2, 1, 1)));
/// ```
#[macro_export]
macro_rules! oid {
    ($($arc:expr),* $(,)?) => {
        $crate::oid::Oid::from_slice(&[$($arc),*])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let oid = Oid::parse("1.3.6.1.2.1.1.1.0").unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 1, 0]);
        assert_eq!(oid.to_string(), "1.3.6.1.2.1.1.1.0");
        assert!(Oid::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let err = Oid::parse("1.3..6").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOid {
                kind: OidErrorKind::InvalidArc,
                input: Some(_)
            }
        ));
        assert!("1.3.-6".parse::<Oid>().is_err());
    }

    #[test]
    fn test_ber_encoding() {
        // (1*40+3)=43, 6, 1
        assert_eq!(oid!(1, 3, 6, 1).to_ber(), vec![0x2B, 0x06, 0x01]);
        assert_eq!(oid!(1, 3, 6, 1).ber_encoded_len(), 5);
    }

    #[test]
    fn test_ber_multi_byte_arcs() {
        let oid = oid!(1, 3, 6, 1, 4, 1, 2021, 4294967295);
        let ber = oid.to_ber();
        assert_eq!(&ber[5..7], &[0x8F, 0x65]);
        assert_eq!(&ber[7..], &[0x8F, 0xFF, 0xFF, 0xFF, 0x7F]);
        assert_eq!(Oid::from_ber(&ber).unwrap(), oid);
    }

    #[test]
    fn test_large_second_arc_under_joint_iso() {
        // 2.999 -> 1079 -> 0x88 0x37
        let oid = oid!(2, 999, 3);
        assert_eq!(oid.to_ber(), vec![0x88, 0x37, 0x03]);
        assert_eq!(Oid::from_ber(&oid.to_ber()).unwrap(), oid);
    }

    #[test]
    fn test_from_ber_truncated_subidentifier() {
        let err = Oid::from_ber(&[0x2B, 0x86]).unwrap_err();
        assert_eq!(err, Error::malformed(2, DecodeErrorKind::InvalidOidEncoding));
    }

    #[test]
    fn test_from_ber_subidentifier_overflow() {
        let err = Oid::from_ber(&[0x2B, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x7F]).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedPdu {
                kind: DecodeErrorKind::IntegerOverflow,
                ..
            }
        ));
    }

    #[test]
    fn test_from_ber_enforces_max_oid_len() {
        let mut ber = vec![0x2B];
        ber.extend(std::iter::repeat_n(0x01, MAX_OID_LEN));
        assert!(matches!(
            Oid::from_ber(&ber),
            Err(Error::MalformedPdu {
                kind: DecodeErrorKind::OidTooLong { .. },
                ..
            })
        ));

        let mut ok = vec![0x2B];
        ok.extend(std::iter::repeat_n(0x01, MAX_OID_LEN - 2));
        assert_eq!(Oid::from_ber(&ok).unwrap().len(), MAX_OID_LEN);
    }

    #[test]
    fn test_validate() {
        assert!(oid!(1, 3, 6, 1).validate().is_ok());
        assert!(oid!(2, 999).validate().is_ok());
        assert_eq!(
            oid!(3, 0).validate().unwrap_err(),
            Error::invalid_oid(OidErrorKind::InvalidFirstArc(3))
        );
        assert_eq!(
            oid!(1, 40).validate().unwrap_err(),
            Error::invalid_oid(OidErrorKind::InvalidSecondArc {
                first: 1,
                second: 40
            })
        );
        assert!(Oid::new(0..200).validate_length().is_err());
        assert_eq!(
            oid!(1).validate().unwrap_err(),
            Error::invalid_oid(OidErrorKind::SingleArc)
        );
        assert!(Oid::empty().validate().is_ok());
    }

    #[test]
    fn test_max_second_arc_under_joint_iso() {
        let oid = oid!(2, u32::MAX, 7);
        assert!(oid.validate().is_ok());
        // 80 + u32::MAX needs 33 bits, five base-128 groups
        assert_eq!(
            oid.to_ber(),
            vec![0x90, 0x80, 0x80, 0x80, 0x4F, 0x07]
        );
        assert_eq!(Oid::from_ber(&oid.to_ber()).unwrap(), oid);
    }

    #[test]
    fn test_from_ber_first_subidentifier_overflow() {
        // 81 + u32::MAX
        let err = Oid::from_ber(&[0x90, 0x80, 0x80, 0x80, 0x50]).unwrap_err();
        assert_eq!(err, Error::malformed(4, DecodeErrorKind::IntegerOverflow));
    }

    #[test]
    fn test_invalid_oids_do_not_round_trip() {
        let cases = [
            (oid!(1), oid!(1, 0)),
            (oid!(5, 3), oid!(2, 123)),
            (oid!(1, 40, 1), oid!(2, 0, 1)),
        ];
        for (sent, decoded) in cases {
            assert!(sent.validate().is_err(), "{sent}");
            assert_eq!(Oid::from_ber(&sent.to_ber()).unwrap(), decoded);
        }
    }

    #[test]
    fn test_child_and_ordering() {
        let system = oid!(1, 3, 6, 1, 2, 1, 1);
        let descr = system.child(1);
        assert!(descr.starts_with(&system));
        assert!(system < descr);
        assert!(descr < oid!(1, 3, 6, 1, 2, 1, 2));
    }
}
