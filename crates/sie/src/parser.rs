//! Single-pass, line-by-line SIE parser.

use core::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use huvudbok_ledger::{Account, AccountCode, Row};

use crate::document::{BalanceKind, FiscalYear, SieBalance, SieDocument, SieVerification};
use crate::error::SieError;
use crate::tokenizer::tokenize;

/// Parse a complete SIE text into a document.
///
/// Stops at the first structurally malformed line; everything recoverable
/// (unknown tags, unparseable verification dates, unbalanced blocks) is kept
/// or skipped without failing.
pub fn parse(text: &str) -> Result<SieDocument, SieError> {
    let mut parser = Parser::default();
    for (idx, raw) in text.lines().enumerate() {
        parser.line(idx + 1, raw)?;
    }
    parser.finish()
}

struct Pending {
    header_line: usize,
    ver: SieVerification,
}

#[derive(Default)]
struct Parser {
    doc: SieDocument,
    pending: Option<Pending>,
    in_block: bool,
}

impl Parser {
    fn line(&mut self, no: usize, raw: &str) -> Result<(), SieError> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }

        match line {
            "{" => self.open_block(no),
            "}" => self.close_block(no),
            _ if line.starts_with('#') => self.tag_line(no, line),
            _ => {
                tracing::debug!(line = no, "skipping non-tag line");
                Ok(())
            }
        }
    }

    fn tag_line(&mut self, no: usize, line: &str) -> Result<(), SieError> {
        let tokens = tokenize(line, no)?;
        let tag = tokens[0].to_ascii_uppercase();

        match tag.as_str() {
            "#VER" => self.ver(no, &tokens),
            "#TRANS" => self.trans(no, &tokens),
            "#KONTO" => self.konto(no, &tokens),
            "#IB" => self.balance(no, &tokens, BalanceKind::Opening),
            "#UB" => self.balance(no, &tokens, BalanceKind::Closing),
            "#RES" => self.balance(no, &tokens, BalanceKind::Result),
            "#RAR" => self.rar(no, &tokens),
            "#FNAMN" => {
                self.doc.company_name = Some(required(no, &tokens, 1, "#FNAMN <name>")?.clone());
                Ok(())
            }
            "#ORGNR" => {
                self.doc.org_number = Some(required(no, &tokens, 1, "#ORGNR <number>")?.clone());
                Ok(())
            }
            _ => {
                // Forward-compatible: #RTRANS/#BTRANS audit rows, #DIM/#OBJEKT
                // dimensions and anything newer are not ours to reject.
                tracing::debug!(line = no, tag = %tag, "skipping unsupported tag");
                Ok(())
            }
        }
    }

    fn open_block(&mut self, no: usize) -> Result<(), SieError> {
        if self.pending.is_some() && !self.in_block {
            self.in_block = true;
            Ok(())
        } else {
            Err(SieError::malformed(no, "unexpected '{'"))
        }
    }

    fn close_block(&mut self, no: usize) -> Result<(), SieError> {
        if !self.in_block {
            return Err(SieError::malformed(no, "unexpected '}'"));
        }
        self.in_block = false;
        if let Some(pending) = self.pending.take() {
            self.doc.verifications.push(pending.ver);
        }
        Ok(())
    }

    fn ver(&mut self, no: usize, tokens: &[String]) -> Result<(), SieError> {
        if self.in_block {
            let header = self.pending.as_ref().map(|p| p.header_line).unwrap_or(no);
            return Err(SieError::malformed(header, "unterminated verification block"));
        }
        // Braceless style: a new header closes the previous verification.
        if let Some(pending) = self.pending.take() {
            self.doc.verifications.push(pending.ver);
        }

        if tokens.len() < 4 {
            return Err(SieError::malformed(
                no,
                "wrong field count for #VER (expected #VER <series> <number> <date> [text])",
            ));
        }

        let number = if tokens[2].is_empty() {
            None
        } else {
            Some(tokens[2].parse::<u32>().map_err(|_| {
                SieError::malformed(no, format!("invalid verification number '{}'", tokens[2]))
            })?)
        };

        let date = parse_date(&tokens[3]);
        if date.is_none() {
            tracing::warn!(line = no, raw = %tokens[3], "unparseable verification date");
        }

        self.pending = Some(Pending {
            header_line: no,
            ver: SieVerification {
                series: tokens[1].clone(),
                number,
                date,
                text: tokens.get(4).cloned().unwrap_or_default(),
                rows: Vec::new(),
            },
        });
        Ok(())
    }

    fn trans(&mut self, no: usize, tokens: &[String]) -> Result<(), SieError> {
        let Some(pending) = self.pending.as_mut() else {
            return Err(SieError::malformed(no, "#TRANS outside a verification"));
        };

        let code_token = required(no, tokens, 1, "#TRANS <account> {objects} <amount>")?;
        let account = AccountCode::from_str(code_token)
            .map_err(|_| SieError::malformed(no, format!("invalid account code '{code_token}'")))?;

        // The object list is optional in the wild; skip it when present.
        let mut idx = 2;
        if tokens.get(idx).is_some_and(|t| t.starts_with('{')) {
            idx += 1;
        }
        let amount_token = required(no, tokens, idx, "#TRANS <account> {objects} <amount>")?;
        let amount = parse_amount(no, amount_token)?;

        // Remaining positional fields: optional transaction date, then text.
        let mut text = None;
        for token in &tokens[idx + 1..] {
            if text.is_none() && is_date_token(token) {
                continue;
            }
            if text.is_none() {
                text = Some(token.clone());
            }
        }

        // SIE amounts are signed, debit-positive.
        let mut row = if amount.is_sign_negative() {
            Row::credit(account, -amount)
        } else {
            Row::debit(account, amount)
        };
        row.text = text;
        pending.ver.rows.push(row);
        Ok(())
    }

    fn konto(&mut self, no: usize, tokens: &[String]) -> Result<(), SieError> {
        if tokens.len() < 3 {
            return Err(SieError::malformed(
                no,
                "wrong field count for #KONTO (expected #KONTO <code> <name>)",
            ));
        }
        let code = AccountCode::from_str(&tokens[1])
            .map_err(|_| SieError::malformed(no, format!("invalid account code '{}'", tokens[1])))?;
        self.doc.accounts.push(Account::new(code, tokens[2].clone()));
        Ok(())
    }

    fn balance(&mut self, no: usize, tokens: &[String], kind: BalanceKind) -> Result<(), SieError> {
        if tokens.len() < 4 {
            return Err(SieError::malformed(
                no,
                format!("wrong field count for {} (expected <year> <account> <amount>)", tokens[0]),
            ));
        }
        let year_index = tokens[1]
            .parse::<i32>()
            .map_err(|_| SieError::malformed(no, format!("invalid fiscal year index '{}'", tokens[1])))?;
        let account = AccountCode::from_str(&tokens[2])
            .map_err(|_| SieError::malformed(no, format!("invalid account code '{}'", tokens[2])))?;
        let amount = parse_amount(no, &tokens[3])?;

        self.doc.balances.push(SieBalance {
            kind,
            year_index,
            account,
            amount,
        });
        Ok(())
    }

    fn rar(&mut self, no: usize, tokens: &[String]) -> Result<(), SieError> {
        if tokens.len() < 4 {
            return Err(SieError::malformed(
                no,
                "wrong field count for #RAR (expected #RAR <index> <start> <end>)",
            ));
        }
        let index = tokens[1]
            .parse::<i32>()
            .map_err(|_| SieError::malformed(no, format!("invalid fiscal year index '{}'", tokens[1])))?;
        let start = parse_date(&tokens[2])
            .ok_or_else(|| SieError::malformed(no, format!("invalid date '{}'", tokens[2])))?;
        let end = parse_date(&tokens[3])
            .ok_or_else(|| SieError::malformed(no, format!("invalid date '{}'", tokens[3])))?;

        self.doc.fiscal_years.push(FiscalYear { index, start, end });
        Ok(())
    }

    fn finish(mut self) -> Result<SieDocument, SieError> {
        if let Some(pending) = self.pending.take() {
            if self.in_block {
                return Err(SieError::malformed(
                    pending.header_line,
                    "unterminated verification block",
                ));
            }
            self.doc.verifications.push(pending.ver);
        }
        Ok(self.doc)
    }
}

fn required<'a>(
    no: usize,
    tokens: &'a [String],
    idx: usize,
    usage: &str,
) -> Result<&'a String, SieError> {
    tokens
        .get(idx)
        .ok_or_else(|| SieError::malformed(no, format!("wrong field count (expected {usage})")))
}

/// Amounts accept both decimal comma and decimal period.
fn parse_amount(no: usize, token: &str) -> Result<Decimal, SieError> {
    let normalized = token.replace(',', ".");
    Decimal::from_str(&normalized)
        .map_err(|_| SieError::malformed(no, format!("invalid amount '{token}'")))
}

fn parse_date(token: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(token, "%Y%m%d")
        .ok()
        .or_else(|| NaiveDate::parse_from_str(token, "%Y-%m-%d").ok())
}

fn is_date_token(token: &str) -> bool {
    token.len() == 8 && token.bytes().all(|b| b.is_ascii_digit())
}
