use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Returned when a wire name does not match any variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} '{value}'")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $kind:literal {
            $($variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Name used on the wire and in query parameters.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_uppercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    }),
                }
            }
        }
    };
}

wire_enum! {
    /// Outcome of a transaction.
    TxnStatus, "status" {
        Success => "SUCCESS",
        Failed => "FAILED",
        Pending => "PENDING",
    }
}

wire_enum! {
    /// Payment rail used by a transaction.
    PaymentMethod, "payment method" {
        Upi => "UPI",
        Card => "CARD",
        NetBanking => "NET_BANKING",
        Wallet => "WALLET",
    }
}

wire_enum! {
    /// Direction of money movement.
    TxnType, "transaction type" {
        Payin => "PAYIN",
        Payout => "PAYOUT",
        Refund => "REFUND",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_names_round_trip_through_from_str() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>().unwrap(), *method);
        }
        assert_eq!("net_banking".parse::<PaymentMethod>().unwrap(), PaymentMethod::NetBanking);
    }

    #[test]
    fn test_unknown_name_is_rejected() {
        let err = "CHEQUE".parse::<PaymentMethod>().unwrap_err();
        assert_eq!(err.kind, "payment method");
        assert_eq!(err.to_string(), "Unknown payment method 'CHEQUE'");
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&TxnStatus::Failed).unwrap();
        assert_eq!(json, "\"FAILED\"");
        let parsed: TxnType = serde_json::from_str("\"REFUND\"").unwrap();
        assert_eq!(parsed, TxnType::Refund);
    }
}
