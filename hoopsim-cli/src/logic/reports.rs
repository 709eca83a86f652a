use anyhow::Result;
use colored::Colorize;
use hoopsim_game::{Commentary, CommentarySource, MatchConfig, Side};
use serde::Serialize;
use std::io::Write;

use super::batch::{BatchAggregate, MatchRecord};

/// Everything a report renders.
#[derive(Debug, Clone, Copy)]
pub struct ReportInput<'a> {
    pub records: &'a [MatchRecord],
    pub aggregate: Option<&'a BatchAggregate>,
    pub commentary: Option<&'a Commentary>,
    pub config: &'a MatchConfig,
    pub show_plays: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    config: &'a MatchConfig,
    matches: &'a [MatchRecord],
    #[serde(skip_serializing_if = "Option::is_none")]
    aggregate: Option<&'a BatchAggregate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    commentary: Option<&'a Commentary>,
}

fn scoreline(record: &MatchRecord) -> String {
    let result = &record.result;
    format!(
        "{} {} - {} {}",
        result.player1.name,
        result.score(Side::One),
        result.score(Side::Two),
        result.player2.name
    )
}

pub fn generate_console_report(out: &mut dyn Write, input: &ReportInput<'_>) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "🏀 Matchup Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "==================".cyan())?;
    writeln!(
        out,
        "Rules: first to {} (win by {}), {:?} possession, {:?} scoring",
        input.config.target_score,
        input.config.win_by,
        input.config.possession_rule,
        input.config.scoring
    )?;
    writeln!(out)?;

    for record in input.records {
        writeln!(
            out,
            "seed {:<20} {}  ({} wins, {} possessions)",
            record.seed,
            scoreline(record).bold(),
            record.winner_name().green(),
            record.result.possessions
        )?;
    }

    if input.show_plays
        && let Some(record) = input.records.first()
    {
        writeln!(out)?;
        writeln!(out, "{}", "🧮 Derived ratings".bright_yellow().bold())?;
        for side in [Side::One, Side::Two] {
            let attributes = record.result.attributes(side);
            writeln!(
                out,
                "  {:<24} efficiency {:.2}, clutch {:.2}, stamina {:.2}, three tendency {:.2}",
                record.result.player(side).name,
                attributes.scoring_efficiency,
                attributes.clutch_rating,
                attributes.stamina,
                attributes.three_point_tendency
            )?;
        }

        writeln!(out)?;
        writeln!(out, "{}", "📋 Play-by-play (first seed)".bright_yellow().bold())?;
        for event in &record.result.game_log {
            writeln!(
                out,
                "  #{:<3} {:<24} {:<40} {}-{}",
                event.index,
                record.result.player(event.side).name,
                event.tag,
                event.score_after[0],
                event.score_after[1]
            )?;
        }
    }

    if let Some(aggregate) = input.aggregate {
        writeln!(out)?;
        writeln!(out, "{}", "📊 Batch Summary".bright_cyan().bold())?;
        writeln!(out, "{}", "================".cyan())?;
        writeln!(out, "Matchups: {}", aggregate.matchups)?;
        for idx in 0..2 {
            writeln!(
                out,
                "{}: {} wins ({:.1}%), mean score {:.1}, three-point share {:.1}%",
                aggregate.names[idx].bold(),
                aggregate.wins[idx],
                aggregate.win_share[idx] * 100.0,
                aggregate.mean_score[idx],
                aggregate.three_point_share[idx] * 100.0
            )?;
        }
        writeln!(out, "Mean possessions: {:.1}", aggregate.mean_possessions)?;
        writeln!(out, "Simulation time: {:?}", aggregate.elapsed)?;
    }

    if let Some(commentary) = input.commentary {
        writeln!(out)?;
        let label = match commentary.source {
            CommentarySource::Generated => "🎙️  Commentary".bright_magenta().bold(),
            CommentarySource::Template => "🎙️  Commentary (template)".magenta().bold(),
        };
        writeln!(out, "{label}")?;
        writeln!(out, "{}", commentary.text)?;
    }
    Ok(())
}

pub fn generate_json_report(out: &mut dyn Write, input: &ReportInput<'_>) -> Result<()> {
    let report = JsonReport {
        config: input.config,
        matches: input.records,
        aggregate: input.aggregate,
        commentary: input.commentary,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)?;
    Ok(())
}

pub fn generate_markdown_report(out: &mut dyn Write, input: &ReportInput<'_>) -> Result<()> {
    writeln!(out, "# Hoopsim Matchup Results\n")?;
    writeln!(
        out,
        "- **Target**: {} (win by {})",
        input.config.target_score, input.config.win_by
    )?;
    writeln!(out, "- **Matchups**: {}\n", input.records.len())?;

    writeln!(out, "| Seed | Score | Winner | Possessions |")?;
    writeln!(out, "| ---- | ----- | ------ | ----------- |")?;
    for record in input.records {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            record.seed,
            scoreline(record),
            record.winner_name(),
            record.result.possessions
        )?;
    }

    if let Some(aggregate) = input.aggregate {
        writeln!(out, "\n## Summary\n")?;
        for idx in 0..2 {
            writeln!(
                out,
                "- **{}**: {} wins ({:.1}%), mean score {:.1}, three-point share {:.1}%",
                aggregate.names[idx],
                aggregate.wins[idx],
                aggregate.win_share[idx] * 100.0,
                aggregate.mean_score[idx],
                aggregate.three_point_share[idx] * 100.0
            )?;
        }
        writeln!(out, "- **Mean possessions**: {:.1}", aggregate.mean_possessions)?;
    }

    if let Some(commentary) = input.commentary {
        writeln!(out, "\n## Commentary\n")?;
        writeln!(out, "{}", commentary.text)?;
    }
    Ok(())
}

pub fn generate_csv_report(out: &mut dyn Write, records: &[MatchRecord]) -> Result<()> {
    writeln!(
        out,
        "seed,player1,player2,score1,score2,winner,possessions,three_share1,three_share2"
    )?;
    for record in records {
        let result = &record.result;
        writeln!(
            out,
            "{},{},{},{},{},{},{},{:.3},{:.3}",
            record.seed,
            csv_field(&result.player1.name),
            csv_field(&result.player2.name),
            result.score(Side::One),
            result.score(Side::Two),
            csv_field(record.winner_name()),
            result.possessions,
            result.three_point_share(Side::One),
            result.three_point_share(Side::Two)
        )?;
    }
    Ok(())
}

fn csv_field(raw: &str) -> String {
    if raw.contains([',', '"', '\n']) {
        format!("\"{}\"", raw.replace('"', "\"\""))
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::batch::aggregate;
    use hoopsim_game::{MatchRng, PlayerRecord, Position, simulate, template_summary};
    use std::time::Duration;

    fn record(seed: u64) -> MatchRecord {
        let a = PlayerRecord::new("1", "Ace, Jr.", Position::PointGuard);
        let b = PlayerRecord::new("2", "Big", Position::Center);
        let mut rng = MatchRng::from_user_seed(seed);
        MatchRecord {
            seed,
            result: simulate(&a, &b, 11, &mut rng).unwrap(),
        }
    }

    fn render(
        generate: fn(&mut dyn Write, &ReportInput<'_>) -> Result<()>,
        input: &ReportInput<'_>,
    ) -> String {
        let mut buf = Vec::new();
        generate(&mut buf, input).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn console_report_lists_seeds_and_commentary() {
        let records = vec![record(1), record(2)];
        let summary = aggregate(&records, Duration::ZERO).unwrap();
        let commentary = Commentary {
            text: template_summary(&records[0].result),
            source: CommentarySource::Template,
        };
        let config = MatchConfig::default();
        let input = ReportInput {
            records: &records,
            aggregate: Some(&summary),
            commentary: Some(&commentary),
            config: &config,
            show_plays: true,
        };
        let text = render(generate_console_report, &input);
        assert!(text.contains("Matchup Summary"));
        assert!(text.contains("Batch Summary"));
        assert!(text.contains("Play-by-play"));
        assert!(text.contains("Derived ratings"));
        assert!(text.contains("three tendency"));
        assert!(text.contains(&commentary.text));
    }

    #[test]
    fn json_report_embeds_matches() {
        let records = vec![record(3)];
        let config = MatchConfig::default();
        let input = ReportInput {
            records: &records,
            aggregate: None,
            commentary: None,
            config: &config,
            show_plays: false,
        };
        let text = render(generate_json_report, &input);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["matches"][0]["seed"], 3);
        assert!(value.get("commentary").is_none());
    }

    #[test]
    fn markdown_report_has_table() {
        let records = vec![record(4)];
        let config = MatchConfig::default();
        let input = ReportInput {
            records: &records,
            aggregate: None,
            commentary: None,
            config: &config,
            show_plays: false,
        };
        let text = render(generate_markdown_report, &input);
        assert!(text.starts_with("# Hoopsim Matchup Results"));
        assert!(text.contains("| Seed | Score | Winner | Possessions |"));
    }

    #[test]
    fn csv_report_quotes_names() {
        let records = vec![record(5)];
        let mut buf = Vec::new();
        generate_csv_report(&mut buf, &records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("seed,player1"));
        assert!(lines.next().unwrap().starts_with("5,\"Ace, Jr.\",Big,"));
    }
}
