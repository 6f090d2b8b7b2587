// libleia/src/types.rs

use derive_more::Display;

/// コマンド識別子 (1 バイトの ASCII 文字)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CommandId {
    #[display(fmt = "?")]
    IsCardInserted,
    #[display(fmt = "c")]
    ConfigureSmartcard,
    #[display(fmt = "t")]
    GetAtr,
    #[display(fmt = "O")]
    SetTriggerStrategy,
    #[display(fmt = "a")]
    SendApdu,
}

impl CommandId {
    pub const fn as_byte(&self) -> u8 {
        match self {
            CommandId::IsCardInserted => b'?',
            CommandId::ConfigureSmartcard => b'c',
            CommandId::GetAtr => b't',
            CommandId::SetTriggerStrategy => b'O',
            CommandId::SendApdu => b'a',
        }
    }

    pub fn as_char(&self) -> char {
        self.as_byte() as char
    }

    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'?' => Some(Self::IsCardInserted),
            b'c' => Some(Self::ConfigureSmartcard),
            b't' => Some(Self::GetAtr),
            b'O' => Some(Self::SetTriggerStrategy),
            b'a' => Some(Self::SendApdu),
            _ => None,
        }
    }
}

/// Smartcard transmission protocol
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Protocol {
    #[display(fmt = "T=0")]
    T0 = 0,
    /// Used unless the caller asks otherwise
    #[default]
    #[display(fmt = "T=1")]
    T1 = 1,
}

impl Protocol {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::T0),
            1 => Some(Self::T1),
            _ => None,
        }
    }
}
