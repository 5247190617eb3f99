use crate::errors::{WalletError, WalletResult};
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};

/// Input validation for the wallet send and backup flows
pub struct InputValidator {
    // Compiled regex patterns for performance
    amount_pattern: Regex,

    // Blacklisted patterns for security
    malicious_patterns: Vec<Regex>,
}

const MAX_INPUT_LENGTH: usize = 1000;
const MAX_RECIPIENT_LENGTH: usize = 100;
const MAX_PASSWORD_LENGTH: usize = 256;
const MAX_TRANSFER_AMOUNT: f64 = 1_000_000_000.0;

impl InputValidator {
    pub fn new() -> WalletResult<Self> {
        let amount_pattern = Regex::new(r"^\d+(\.\d{1,18})?$")
            .map_err(|e| WalletError::ValidationError(format!("Invalid amount regex: {}", e)))?;

        // Common malicious patterns to block
        let malicious_patterns = vec![
            Regex::new(r"<script").unwrap(),
            Regex::new(r"javascript:").unwrap(),
            Regex::new(r"data:text/html").unwrap(),
            Regex::new(r"vbscript:").unwrap(),
            Regex::new(r"onload=").unwrap(),
            Regex::new(r"onerror=").unwrap(),
        ];

        Ok(InputValidator {
            amount_pattern,
            malicious_patterns,
        })
    }

    /// Validate a transfer recipient. Only local checks: non-empty and not
    /// hostile. Address shape is the provider's concern.
    pub fn validate_recipient(&self, recipient: &str) -> WalletResult<()> {
        self.check_basic_security(recipient)?;

        if recipient.is_empty() {
            return Err(WalletError::InvalidAddress(
                "Recipient cannot be empty".to_string(),
            ));
        }

        if recipient.len() > MAX_RECIPIENT_LENGTH {
            return Err(WalletError::InvalidAddress(
                "Recipient too long".to_string(),
            ));
        }

        Ok(())
    }

    /// Validate a decimal amount string; returns the trimmed wire form.
    pub fn validate_amount(&self, amount: &str) -> WalletResult<String> {
        let amount = amount.trim();
        self.check_basic_security(amount)?;

        if amount.is_empty() {
            return Err(WalletError::InvalidAmount(
                "Amount cannot be empty".to_string(),
            ));
        }

        if !self.amount_pattern.is_match(amount) {
            return Err(WalletError::InvalidAmount(
                "Amount format is invalid".to_string(),
            ));
        }

        let parsed: f64 = amount
            .parse()
            .map_err(|_| WalletError::InvalidAmount("Invalid number format".to_string()))?;

        if !parsed.is_finite() || parsed <= 0.0 {
            return Err(WalletError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        if parsed > MAX_TRANSFER_AMOUNT {
            return Err(WalletError::InvalidAmount("Amount too large".to_string()));
        }

        Ok(amount.to_string())
    }

    /// Validate a backup/recovery password. No strength policy here; the
    /// provider enforces its own on the backup primitive.
    pub fn validate_password(&self, password: &SecretString) -> WalletResult<()> {
        let exposed = password.expose_secret();
        if exposed.is_empty() {
            return Err(WalletError::ValidationError(
                "Password cannot be empty".to_string(),
            ));
        }

        if exposed.len() > MAX_PASSWORD_LENGTH {
            return Err(WalletError::ValidationError(
                "Password too long".to_string(),
            ));
        }

        Ok(())
    }

    /// Check for basic security issues in any input
    fn check_basic_security(&self, input: &str) -> WalletResult<()> {
        if input.len() > MAX_INPUT_LENGTH {
            return Err(WalletError::ValidationError("Input too long".to_string()));
        }

        for pattern in &self.malicious_patterns {
            if pattern.is_match(&input.to_lowercase()) {
                return Err(WalletError::ValidationError(
                    "Input contains potentially malicious content".to_string(),
                ));
            }
        }

        Ok(())
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new().expect("Failed to create InputValidator")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recipient_rules() {
        let validator = InputValidator::default();
        assert!(validator.validate_recipient("Sol2").is_ok());
        assert!(matches!(
            validator.validate_recipient(""),
            Err(WalletError::InvalidAddress(_))
        ));
        assert!(matches!(
            validator.validate_recipient(&"a".repeat(101)),
            Err(WalletError::InvalidAddress(_))
        ));
        assert!(validator.validate_recipient("<script>alert(1)").is_err());
    }

    #[test]
    fn amount_rules() {
        let validator = InputValidator::default();
        assert_eq!(validator.validate_amount("10.5").unwrap(), "10.5");
        assert_eq!(validator.validate_amount(" 10 ").unwrap(), "10");
        assert!(matches!(
            validator.validate_amount("0"),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(
            validator.validate_amount("-1"),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(
            validator.validate_amount("abc"),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(matches!(
            validator.validate_amount(""),
            Err(WalletError::InvalidAmount(_))
        ));
        assert!(validator.validate_amount("2000000000").is_err());
    }

    #[test]
    fn password_rules() {
        let validator = InputValidator::default();
        assert!(validator
            .validate_password(&SecretString::from("hunter2".to_string()))
            .is_ok());
        assert!(validator
            .validate_password(&SecretString::from(String::new()))
            .is_err());
        assert!(validator
            .validate_password(&SecretString::from("x".repeat(300)))
            .is_err());
    }
}
