//! HTML fragment rendering for the results and ranking regions.
//!
//! Every backend- or user-supplied string goes through `escape_html` before it
//! is concatenated into markup. Numeric fields are printed the way a browser
//! prints a JS number (`9`, `8.5`), scores with fixed decimals.

pub mod shell;

use crate::models::candidate::CandidateResult;

pub const NO_CANDIDATES: &str = "No candidates to display";

/// Escapes text for safe insertion into element content or quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Colour class for a 0–10 score.
pub fn score_class(score: f64) -> &'static str {
    if score >= 8.0 {
        "score-high"
    } else if score >= 5.0 {
        "score-medium"
    } else {
        "score-low"
    }
}

/// Shortest display form of a number: integral values drop the fraction.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // also covers -0.0
        "0".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// Enough fraction digits to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Fixed-point text with `digits` decimals, as a browser's `toFixed` prints it.
///
/// Rounding is to nearest on the exact binary value; an exact tie goes to the
/// larger magnitude (`8.25` -> `8.3`), where `format!` would pick the even digit.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return format_number(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return format!("{sign}{exact}");
    };

    let (kept, rest) = frac_part.split_at(digits);
    let is_tie = rest.starts_with('5') && rest[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return format!("{sign}{:.*}", digits, value.abs());
    }

    let mut buf: Vec<u8> = int_part.bytes().chain(kept.bytes()).collect();
    let mut carry = true;
    for d in buf.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
            break;
        }
    }
    if carry {
        buf.insert(0, b'1');
    }

    let split = buf.len() - digits;
    let int_digits: String = buf[..split].iter().map(|&b| b as char).collect();
    let frac_digits: String = buf[split..].iter().map(|&b| b as char).collect();
    if digits == 0 {
        format!("{sign}{int_digits}")
    } else {
        format!("{sign}{int_digits}.{frac_digits}")
    }
}

/// Badge class for a 1-based rank: the podium gets its own treatment.
pub fn rank_class(rank: usize) -> String {
    if rank <= 3 {
        format!("rank-{rank}")
    } else {
        "rank-other".to_string()
    }
}

/// Score bar fill in percent of the 0–10 range.
pub fn score_percent(score: f64) -> f64 {
    (score / 10.0) * 100.0
}

pub fn render_loading(message: &str) -> String {
    format!(r#"<div class="loading">{}</div>"#, escape_html(message))
}

pub fn render_error(message: &str) -> String {
    format!(
        r#"<div class="error-box"><strong>Error:</strong> {}</div>"#,
        escape_html(message)
    )
}

/// Single analysis card.
pub fn render_result(candidate: &CandidateResult) -> String {
    format!(
        r#"<div class="result-card">
    <div class="result-header">
        <div>
            <div class="result-name">{name}</div>
            <div class="result-university">{university}</div>
        </div>
        <div class="result-score {class}">{score}</div>
    </div>
    <div class="result-details">
        <div class="detail-item">
            <div class="detail-label">University Tier</div>
            <div class="detail-value">{uni}/10</div>
        </div>
        <div class="detail-item">
            <div class="detail-label">Python Mastery</div>
            <div class="detail-value">{python}/10</div>
        </div>
        <div class="detail-item">
            <div class="detail-label">Experience</div>
            <div class="detail-value">{years} Years</div>
        </div>
    </div>
    <div class="evidence-quote">
        <strong>Key Evidence Detected</strong>
        "{evidence}"
    </div>
</div>"#,
        name = escape_html(&candidate.name),
        university = escape_html(&candidate.university),
        class = score_class(candidate.final_rank_score),
        score = to_fixed(candidate.final_rank_score, 1),
        uni = format_number(candidate.uni_tier_score),
        python = format_number(candidate.python_score),
        years = format_number(candidate.python_experience_years),
        evidence = escape_html(&candidate.evidence_quote),
    )
}

/// Ranking table in the order given; row `i` is rank `i + 1`.
pub fn render_ranking_table(rankings: &[CandidateResult]) -> String {
    if rankings.is_empty() {
        return format!(r#"<p class="placeholder">{NO_CANDIDATES}</p>"#);
    }

    let rows: String = rankings
        .iter()
        .enumerate()
        .map(|(index, candidate)| render_ranking_row(index + 1, candidate))
        .collect();

    format!(
        r#"<table>
    <thead>
        <tr>
            <th>Rank</th>
            <th>Candidate Profile</th>
            <th>Uni Tier</th>
            <th>Python</th>
            <th>Exp (Yrs)</th>
            <th>Final Score</th>
        </tr>
    </thead>
    <tbody>
{rows}    </tbody>
</table>"#
    )
}

fn render_ranking_row(rank: usize, candidate: &CandidateResult) -> String {
    format!(
        r#"        <tr>
            <td><div class="rank-badge {rank_class}">{rank}</div></td>
            <td>
                <div class="candidate-name">{name}</div>
                <div class="candidate-university">{university}</div>
            </td>
            <td><span class="metric">{uni}</span></td>
            <td><span class="metric">{python}</span></td>
            <td>{years}</td>
            <td>
                <div class="score-bar"><div class="score-bar-fill" style="width: {percent}%"></div></div>
                <div class="score-value {class}">{score} / 10.0</div>
            </td>
        </tr>
"#,
        rank_class = rank_class(rank),
        name = escape_html(&candidate.name),
        university = escape_html(&candidate.university),
        uni = format_number(candidate.uni_tier_score),
        python = format_number(candidate.python_score),
        years = format_number(candidate.python_experience_years),
        percent = format_number(score_percent(candidate.final_rank_score)),
        class = score_class(candidate.final_rank_score),
        score = to_fixed(candidate.final_rank_score, 2),
    )
}
