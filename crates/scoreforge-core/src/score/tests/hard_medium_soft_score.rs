use crate::score::*;

#[test]
fn test_creation() {
    let score = HardMediumSoftScore::of(-1, -20, -300);
    assert_eq!(score.hard(), -1);
    assert_eq!(score.medium(), -20);
    assert_eq!(score.soft(), -300);
    assert_eq!(HardMediumSoftScore::of_medium(-4), HardMediumSoftScore::of(0, -4, 0));
}

#[test]
fn test_feasibility() {
    assert!(HardMediumSoftScore::of(0, -100, -1000).is_feasible());
    assert!(!HardMediumSoftScore::of(-1, 0, 0).is_feasible());
}

#[test]
fn test_comparison() {
    let s1 = HardMediumSoftScore::of(0, -10, -100);
    let s2 = HardMediumSoftScore::of(0, -5, -200);
    assert!(s2 > s1);

    let s3 = HardMediumSoftScore::of(-1, 0, 0);
    assert!(s1 > s3);
}

#[test]
fn test_arithmetic() {
    let s1 = HardMediumSoftScore::of(-1, -2, -3);
    let s2 = HardMediumSoftScore::of(1, 2, 3);
    assert_eq!(s1 + s2, HardMediumSoftScore::ZERO);
    assert_eq!(s1.abs(), s2);
    assert_eq!(
        HardMediumSoftScore::of(4, -4, 4).multiply(1.2),
        HardMediumSoftScore::of(4, -5, 4)
    );
}

#[test]
fn test_parse_and_display() {
    let score = HardMediumSoftScore::parse("-1hard/-20medium/-300soft").unwrap();
    assert_eq!(score, HardMediumSoftScore::of(-1, -20, -300));
    assert_eq!(score.to_string(), "-1hard/-20medium/-300soft");

    let score = HardMediumSoftScore::of_uninitialized(-7, 0, -20, 0);
    assert_eq!(score.to_string(), "-7init/0hard/-20medium/0soft");
    assert_eq!(score.to_short_string(), "-7init/-20medium");
    assert_eq!(HardMediumSoftScore::parse(&score.to_string()).unwrap(), score);

    assert!(HardMediumSoftScore::parse("-1hard/-300soft").is_err());
}
