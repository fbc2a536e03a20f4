use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Declares a fieldless enum whose variants map one-to-one onto wire strings.
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($(#[$vmeta:meta])* $variant:ident => $wire:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* #[serde(rename = $wire)] $variant,)+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $wire,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let normalized = value.trim().to_ascii_uppercase();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|candidate| candidate.as_str() == normalized)
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        kind: $label,
                        value: value.to_owned(),
                    })
            }
        }
    };
}

wire_enum! {
    /// Exchange and segment a security trades on.
    ExchangeSegment, "exchange segment" {
        /// Index values.
        IdxI => "IDX_I",
        NseEq => "NSE_EQ",
        NseFno => "NSE_FNO",
        NseCurrency => "NSE_CURRENCY",
        BseEq => "BSE_EQ",
        BseFno => "BSE_FNO",
        BseCurrency => "BSE_CURRENCY",
        McxComm => "MCX_COMM",
    }
}

wire_enum! {
    TransactionType, "transaction type" {
        Buy => "BUY",
        Sell => "SELL",
    }
}

wire_enum! {
    /// Product an order or position is held under.
    ProductType, "product type" {
        /// Cash and carry (delivery).
        Cnc => "CNC",
        Intraday => "INTRADAY",
        Margin => "MARGIN",
        /// Margin trading facility.
        Mtf => "MTF",
        /// Cover order.
        Co => "CO",
        /// Bracket order.
        Bo => "BO",
    }
}

wire_enum! {
    /// Instrument class used by the chart endpoints.
    InstrumentType, "instrument type" {
        Index => "INDEX",
        FutIdx => "FUTIDX",
        OptIdx => "OPTIDX",
        Equity => "EQUITY",
        FutStk => "FUTSTK",
        OptStk => "OPTSTK",
        FutCom => "FUTCOM",
        OptFut => "OPTFUT",
        FutCur => "FUTCUR",
        OptCur => "OPTCUR",
    }
}

wire_enum! {
    /// Candle width in minutes for intraday charts.
    ChartInterval, "chart interval" {
        OneMinute => "1",
        FiveMinutes => "5",
        FifteenMinutes => "15",
        TwentyFiveMinutes => "25",
        SixtyMinutes => "60",
    }
}
