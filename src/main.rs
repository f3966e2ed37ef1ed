use clap::Parser;
use coupon_check::utils::{logger, validation::Validate};
use coupon_check::{
    verdict_exit_code, CatalogConfig, Clock, CliCommand, CliConfig, Coupon,
    CouponApplicabilityChecker, CouponError, EvaluationInput, FixedClock, InMemoryCouponStore,
    SystemClock,
};
use serde_json::{json, Value};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.verbose, config.json);

    tracing::info!("🚀 Starting coupon-check");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證命令列參數
    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let catalog = match load_catalog(&config.catalog) {
        Ok(catalog) => catalog,
        Err(e) => exit_with(&e),
    };

    let store = match catalog.build_store() {
        Ok(store) => store,
        Err(e) => exit_with(&e),
    };

    // 同一次執行中，有效性與時段判斷共用同一個時間點
    let now = match config.command.reference_time() {
        Ok(Some(at)) => at,
        Ok(None) => SystemClock.now(),
        Err(e) => exit_with(&e),
    };
    let clock = FixedClock::new(now);

    let checker = CouponApplicabilityChecker::new(store.finder(), store.validator(clock))
        .with_clock(clock)
        .with_policy(catalog.policy());

    match &config.command {
        CliCommand::Check { code, total, .. } => {
            let coupon = Coupon::new(code.clone());
            let verdict = checker.evaluate(&EvaluationInput::new(&coupon, *total).at(now));

            if config.json {
                let output = json!({
                    "code": code,
                    "total": total,
                    "at": now,
                    "applicable": verdict.is_applicable(),
                    "verdict": verdict,
                });
                print_json(&output);
            } else if let Some(reason) = verdict.rejection() {
                println!("❌ {} is not applicable: {}", code, reason);
            } else {
                println!("✅ {} is applicable", code);
            }

            let exit_code = verdict_exit_code(&verdict);
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        CliCommand::List { total, .. } => {
            print_listing(&store, &checker, *total, now, config.json);
        }
    }

    Ok(())
}

fn load_catalog(path: &str) -> coupon_check::Result<CatalogConfig> {
    tracing::info!("📁 Loading coupon catalog from: {}", path);
    let catalog = CatalogConfig::from_file(path)?;
    catalog.validate()?;
    tracing::info!(
        "✅ Catalog '{}' loaded and validated successfully",
        catalog.catalog_name()
    );
    Ok(catalog)
}

fn print_listing<F, V, C>(
    store: &InMemoryCouponStore,
    checker: &CouponApplicabilityChecker<F, V, C>,
    total: f64,
    now: chrono::NaiveDateTime,
    as_json: bool,
) where
    F: coupon_check::CouponFinder,
    V: coupon_check::CouponValidator,
    C: Clock,
{
    let mut rows = Vec::with_capacity(store.len());
    for entry in store.entries() {
        let verdict = checker.evaluate(&EvaluationInput::new(&entry.coupon, total).at(now));
        rows.push((entry, verdict));
    }

    if as_json {
        let output: Vec<_> = rows
            .iter()
            .map(|(entry, verdict)| {
                json!({
                    "code": entry.coupon.code,
                    "name": entry.name,
                    "applicable": verdict.is_applicable(),
                    "verdict": verdict,
                })
            })
            .collect();
        print_json(&Value::from(output));
        return;
    }

    println!("Coupons for total {} at {}:", total, now);
    for (entry, verdict) in &rows {
        let label = entry.name.as_deref().unwrap_or("-");
        match verdict.rejection() {
            None => println!("  ✅ {:<16} {}", entry.coupon.code, label),
            Some(reason) => println!("  ❌ {:<16} {} ({})", entry.coupon.code, label, reason),
        }
    }
    let applicable = rows.iter().filter(|(_, verdict)| verdict.is_applicable()).count();
    tracing::info!("📊 {} of {} coupons applicable", applicable, rows.len());
}

fn print_json(output: &Value) {
    match serde_json::to_string_pretty(output) {
        Ok(rendered) => println!("{}", rendered),
        Err(e) => exit_with(&CouponError::from(e)),
    }
}

fn exit_with(e: &CouponError) -> ! {
    tracing::error!(
        "❌ coupon-check failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    std::process::exit(e.severity().exit_code());
}
