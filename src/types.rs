//! Wire enums for the Binance TR endpoints.
//!
//! Binance TR encodes most enums as integers, both in request parameters and in
//! response bodies.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! int_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident = $code:expr),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "i64")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn code(self) -> i64 {
                match self {
                    $(Self::$variant => $code),+
                }
            }
        }

        impl TryFrom<i64> for $name {
            type Error = String;

            fn try_from(code: i64) -> Result<Self, Self::Error> {
                match code {
                    $(c if c == $code => Ok(Self::$variant),)+
                    other => Err(format!("invalid {} code {}", stringify!($name), other)),
                }
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> i64 {
                value.code()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.code())
            }
        }
    };
}

int_enum!(SideType { Buy = 0, Sell = 1 });

int_enum!(OrderType {
    Limit = 1,
    Market = 2,
    StopLoss = 3,
    StopLossLimit = 4,
    TakeProfit = 5,
    TakeProfitLimit = 6,
    LimitMaker = 7,
});

int_enum!(OrderStatus {
    New = 0,
    PartiallyFilled = 1,
    Filled = 2,
    Canceled = 3,
    PendingCancel = 4,
    Rejected = 5,
    Expired = 6,
});

int_enum!(TimeInForce { Gtc = 0, Ioc = 1, Fok = 2 });

int_enum!(SymbolType { Spot = 1 });

int_enum!(
    /// Which orders `GET /open/v1/orders` returns.
    ListOrdersType { Open = 1, History = 2, All = -1 }
);

/// Paging direction relative to `fromId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListOrdersSearchDirection {
    /// Ascending from the start order id.
    #[serde(rename = "prev")]
    Prev,
    /// Descending from the start order id.
    #[serde(rename = "next")]
    Next,
}

impl fmt::Display for ListOrdersSearchDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Prev => "prev",
            Self::Next => "next",
        })
    }
}
