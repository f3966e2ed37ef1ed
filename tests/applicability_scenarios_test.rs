use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use coupon_check::{Coupon, CouponApplicabilityChecker, EvaluationInput, FixedClock};

fn at(year: i32, month: u32, day: u32, hms: (u32, u32, u32)) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hms.0, hms.1, hms.2))
        .expect("valid test timestamp")
}

fn lookup(coupons: Vec<Coupon>) -> impl Fn(&str) -> Option<Coupon> + Send + Sync {
    move |code: &str| coupons.iter().find(|coupon| coupon.code == code).cloned()
}

/// SAVE10 需要最低消費 5000
#[test]
fn test_save10_end_to_end() -> Result<()> {
    let checker = CouponApplicabilityChecker::new(
        lookup(vec![Coupon::new("SAVE10").with_minimum_amount(5000.0)]),
        |_: &Coupon| true,
    );
    let coupon = Coupon::new("SAVE10");

    assert!(checker.is_applicable(&coupon, 6000.0, None));
    assert!(!checker.is_applicable(&coupon, 4000.0, None));
    Ok(())
}

/// 查無此券時，金額與時間都不影響結果
#[test]
fn test_absent_coupon_rejected_for_any_amount_and_time() -> Result<()> {
    let checker = CouponApplicabilityChecker::new(lookup(vec![]), |_: &Coupon| true);
    let coupon = Coupon::new("MISSING").with_minimum_amount(0.0);

    for total in [0.0, 1.0, 99_999.0] {
        for hour in [0, 9, 23] {
            assert!(!checker.is_applicable(&coupon, total, Some(at(2025, 5, 1, (hour, 0, 0)))));
        }
    }
    Ok(())
}

#[test]
fn test_validator_veto_wins_over_matching_rules() -> Result<()> {
    let checker =
        CouponApplicabilityChecker::new(lookup(vec![Coupon::new("EXPIRED")]), |_: &Coupon| false);
    assert!(!checker.is_applicable(&Coupon::new("EXPIRED"), 1_000.0, None));
    Ok(())
}

/// 時段判斷在任何日期都以當天的時分秒為準
#[test]
fn test_business_hours_window_on_several_dates() -> Result<()> {
    let checker = CouponApplicabilityChecker::new(
        lookup(vec![
            Coupon::new("OFFICE").with_available_time("09:00:00", "18:00:00")
        ]),
        |_: &Coupon| true,
    );
    let coupon = Coupon::new("OFFICE");

    for (year, month, day) in [(2024, 2, 29), (2025, 1, 1), (2030, 12, 31)] {
        let check = |hms| checker.is_applicable(&coupon, 10.0, Some(at(year, month, day, hms)));
        assert!(!check((8, 59, 59)));
        assert!(check((9, 0, 0)));
        assert!(check((18, 0, 0)));
        assert!(!check((18, 0, 1)));
    }
    Ok(())
}

#[test]
fn test_clock_supplies_default_reference_time() -> Result<()> {
    let checker = CouponApplicabilityChecker::new(
        lookup(vec![
            Coupon::new("MORNING").with_available_time("06:00:00", "10:00:00")
        ]),
        |_: &Coupon| true,
    )
    .with_clock(FixedClock::new(at(2025, 7, 4, (7, 15, 0))));

    let coupon = Coupon::new("MORNING");
    assert!(checker.evaluate(&EvaluationInput::new(&coupon, 1.0)).is_applicable());
    assert!(!checker
        .evaluate(&EvaluationInput::new(&coupon, 1.0).at(at(2025, 7, 4, (10, 0, 1))))
        .is_applicable());
    Ok(())
}

#[test]
fn test_checker_is_shareable_across_threads() -> Result<()> {
    let checker = std::sync::Arc::new(CouponApplicabilityChecker::new(
        lookup(vec![Coupon::new("SHARED").with_minimum_amount(100.0)]),
        |_: &Coupon| true,
    ));

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let checker = std::sync::Arc::clone(&checker);
            std::thread::spawn(move || {
                checker.is_applicable(&Coupon::new("SHARED"), 50.0 * f64::from(i), None)
            })
        })
        .collect();

    let results: Vec<bool> = handles
        .into_iter()
        .map(|handle| handle.join().expect("worker thread panicked"))
        .collect();
    assert_eq!(results, vec![false, false, true, true]);
    Ok(())
}
