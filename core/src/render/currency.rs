// storefront_admin/src/render/currency.rs

/// Money formatting in the storefront's currency, major units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
  pub symbol: String,
}

impl CurrencyFormat {
  pub fn new(symbol: impl Into<String>) -> Self {
    Self { symbol: symbol.into() }
  }

  /// Totals: grouped thousands and exactly two decimals, e.g. `₦2,500.00`.
  pub fn format(&self, amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    format!(
      "{}{}{}.{:02}",
      sign(amount, cents),
      self.symbol,
      group_thousands(cents / 100),
      cents % 100
    )
  }

  /// Unit prices: grouped thousands, decimals only when present (at most
  /// three), e.g. `₦1,000` or `₦1,250.5`.
  pub fn format_plain(&self, amount: f64) -> String {
    let thousandths = (amount.abs() * 1000.0).round() as u64;
    let mut out = format!("{}{}{}", sign(amount, thousandths), self.symbol, group_thousands(thousandths / 1000));
    let frac = thousandths % 1000;
    if frac > 0 {
      out.push('.');
      out.push_str(format!("{:03}", frac).trim_end_matches('0'));
    }
    out
  }
}

impl Default for CurrencyFormat {
  fn default() -> Self {
    Self::new(crate::config::DEFAULT_CURRENCY_SYMBOL)
  }
}

fn sign(amount: f64, scaled: u64) -> &'static str {
  if amount < 0.0 && scaled > 0 {
    "-"
  } else {
    ""
  }
}

fn group_thousands(value: u64) -> String {
  let digits = value.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (idx, ch) in digits.chars().enumerate() {
    if idx > 0 && (digits.len() - idx) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn totals_use_two_decimals() {
    let naira = CurrencyFormat::default();
    assert_eq!(naira.format(2500.0), "₦2,500.00");
    assert_eq!(naira.format(0.0), "₦0.00");
    assert_eq!(naira.format(1234567.891), "₦1,234,567.89");
  }

  #[test]
  fn unit_prices_drop_trailing_zeros() {
    let naira = CurrencyFormat::default();
    assert_eq!(naira.format_plain(1000.0), "₦1,000");
    assert_eq!(naira.format_plain(1250.5), "₦1,250.5");
    assert_eq!(naira.format_plain(999.0), "₦999");
  }
}
