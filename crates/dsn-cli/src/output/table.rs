use dsn_core::indicators::outcome::{IndicatorDetail, IndicatorResult};
use dsn_core::model::ParseResult;
use dsn_core::options::schema::AnalysisOptions;
use dsn_core::report::{AnalysisResult, ReferenceSource};

const FIELD_SAMPLE: usize = 3;

fn or_na(value: Option<&str>) -> &str {
    value.unwrap_or("N/A")
}

pub fn print_parse(parsed: &ParseResult) {
    println!("=== Declaration ===\n");
    println!("  Company:       {}", or_na(parsed.company.legal_name.as_deref()));
    println!("  SIRET:         {}", or_na(parsed.company.siret.as_deref()));
    println!("  Encoding:      {}", parsed.encoding);
    println!("  Lines:         {}", parsed.line_count);
    println!("  Unrecognized:  {}", parsed.unrecognized_lines);
    println!("  Dropped:       {}", parsed.dropped_lines);
    println!("  Field codes:   {}", parsed.field_code_count());
    println!("  Employees:     {}", parsed.employees.len());
    println!(
        "  Period:        {} -> {}",
        or_na(parsed.last_period.start.as_deref()),
        or_na(parsed.last_period.end.as_deref())
    );
    println!();

    println!("=== Field codes ===\n");
    for (code, lines) in &parsed.fields {
        let sample: Vec<&str> = lines
            .iter()
            .take(FIELD_SAMPLE)
            .map(|l| l.value.as_str())
            .collect();
        let more = if lines.len() > FIELD_SAMPLE { ", ..." } else { "" };
        println!("  {}  x{:<4} {}{}", code, lines.len(), sample.join(", "), more);
    }
}

fn print_indicator(result: &IndicatorResult) {
    let score = match result.score {
        Some(s) => format!("{}/{}", s, result.max_score),
        None => format!("-/{}", result.max_score),
    };
    let status = if result.computable { "" } else { "  (not computable)" };
    println!("  {}. {:<50} {}{}", result.kind.number(), result.kind.to_string(), score, status);
    if let Some(ref message) = result.message {
        println!("     {}", message);
    }

    match &result.detail {
        IndicatorDetail::PayGap(d) if d.valid_partitions > 0 => {
            println!(
                "     Average gap {}% over {} group(s)",
                d.average_gap_pct, d.valid_partitions
            );
            for p in &d.partitions {
                println!(
                    "       {:<28} {:<6} M {:>3} x {:>10}  F {:>3} x {:>10}  gap {:>7}%",
                    p.category.to_string(),
                    p.age_bracket.to_string(),
                    p.men,
                    p.mean_men,
                    p.women,
                    p.mean_women,
                    p.gap_pct
                );
            }
        }
        IndicatorDetail::RateGap(d) => {
            println!(
                "     Men {}% ({}/{})  Women {}% ({}/{})  gap {} points  [{}]",
                d.rate_men_pct,
                d.events_men,
                d.matched_men,
                d.rate_women_pct,
                d.events_women,
                d.matched_women,
                d.gap_pct,
                d.window
            );
        }
        IndicatorDetail::TopEarners(d) => {
            if let Some(minority) = d.minority_sex {
                println!(
                    "     {} in top {}: {} (company: {} men, {} women)",
                    minority,
                    d.top.len(),
                    d.minority_in_top,
                    d.company_men,
                    d.company_women
                );
            }
        }
        _ => {}
    }
}

pub fn print_analysis(result: &AnalysisResult, options: &AnalysisOptions, show_employees: bool) {
    let summary = &result.summary;
    println!("=== {} ===\n", or_na(summary.company.legal_name.as_deref()));
    println!("  SIRET:           {}", or_na(summary.company.siret.as_deref()));
    println!("  Employees:       {}", summary.employee_count);
    println!("  Lines:           {} ({} field codes)", summary.line_count, summary.field_code_count);
    if let Some(ref window) = result.window {
        println!("  Periods:         {} ({})", result.periods_analyzed, window);
    }
    let source = match result.reference_source {
        ReferenceSource::Options => "given",
        ReferenceSource::Declaration => "from declaration",
        ReferenceSource::Today => "today, no date declared",
    };
    println!("  Reference date:  {} ({})", result.reference_date, source);
    match options.type_filter() {
        Some(types) => println!(
            "  Remuneration:    {}",
            types.iter().cloned().collect::<Vec<_>>().join(", ")
        ),
        None => println!("  Remuneration:    all types"),
    }
    println!();

    println!("=== Indicators ===\n");
    for indicator in result.indicators.iter() {
        print_indicator(indicator);
    }
    println!();
    println!(
        "  Total: {}/{} (computable indicators only)\n",
        result.points, result.max_points
    );

    let o = &result.overview;
    println!("=== Workforce ===\n");
    println!("  Men:     {:>5} ({}%)", o.men, o.men_pct);
    println!("  Women:   {:>5} ({}%)", o.women, o.women_pct);
    if o.unknown > 0 {
        println!("  Unknown: {:>5}", o.unknown);
    }
    if let (Some(m), Some(w)) = (o.mean_pay_men, o.mean_pay_women) {
        println!("  Mean pay: men {}, women {}", m, w);
    }
    if let Some(gap) = o.pay_gap_pct {
        println!("  Overall gap: {}%", gap);
    }
    println!();

    println!("  {:<6} {:>5} {:>5}", "Age", "M", "F");
    for row in &result.age_pyramid {
        println!("  {:<6} {:>5} {:>5}", row.band, row.men, row.women);
    }
    println!();

    if !result.remuneration_types.is_empty() {
        println!("=== Remuneration types found ===\n");
        for t in &result.remuneration_types {
            println!("  {}  {}", t.code, t.label);
        }
        println!();
    }

    if show_employees {
        println!("=== Employees ===\n");
        let types = options.type_filter();
        for e in &result.employees {
            let name = format!(
                "{} {}",
                e.last_name.as_deref().unwrap_or(""),
                e.first_name.as_deref().unwrap_or("")
            );
            println!(
                "  {:<12} {:<28} {:<2} {:<28} {:<6} {:>12}",
                e.key(),
                name.trim(),
                e.sex.map(|s| s.code()).unwrap_or("?"),
                e.category.map(|c| c.to_string()).unwrap_or_else(|| "?".into()),
                e.age_bracket.map(|b| b.to_string()).unwrap_or_else(|| "?".into()),
                e.total_remuneration(types)
            );
        }
    }
}
