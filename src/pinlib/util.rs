use std::cmp::Ordering;
use std::iter::Peekable;
use std::str::Chars;

fn take_number(chars: &mut Peekable<Chars<'_>>) -> u64 {
    let mut n = 0u64;
    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        n = n.saturating_mul(10).saturating_add(u64::from(d));
        chars.next();
    }
    n
}

/// Compares strings such that embedded unpadded numbers are ordered by value,
/// e.g., `frame_2` comes before `frame_10`.
pub fn natural_cmp(s1: &str, s2: &str) -> Ordering {
    let mut chars1 = s1.chars().peekable();
    let mut chars2 = s2.chars().peekable();
    loop {
        match (chars1.peek().copied(), chars2.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(c1), Some(c2)) => {
                if c1.is_ascii_digit() && c2.is_ascii_digit() {
                    let n1 = take_number(&mut chars1);
                    let n2 = take_number(&mut chars2);
                    if n1 != n2 {
                        return n1.cmp(&n2);
                    }
                } else if c1 != c2 {
                    return c1.cmp(&c2);
                } else {
                    chars1.next();
                    chars2.next();
                }
            }
        }
    }
}

#[test]
fn test_natural_cmp() {
    assert_eq!(natural_cmp("s10", "s2"), Ordering::Greater);
    assert_eq!(natural_cmp("10s", "s2"), Ordering::Less);
    assert_eq!(natural_cmp("10", "2"), Ordering::Greater);
    assert_eq!(natural_cmp("10.0", "10.0"), Ordering::Equal);
    assert_eq!(natural_cmp("frame_00002", "frame_00010"), Ordering::Less);
    assert_eq!(natural_cmp("frame_2", "frame_10"), Ordering::Less);
    assert_eq!(natural_cmp("frame_2", "frame_2a"), Ordering::Less);
}
