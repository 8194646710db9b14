use std::fmt;

/// Index of a GPU device as understood by the management daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Daemon-assigned id of a registered performance configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigId(pub u32);

impl fmt::Display for ConfigId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One register write in a performance configuration.
///
/// Performance (OA metric) configurations are built from lists of these;
/// on the wire each list travels as a `u32` array of offset, value pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigRegister {
    /// MMIO offset of the register.
    pub offset: u32,
    /// Value to program.
    pub value: u32,
}

impl ConfigRegister {
    /// Create a register write.
    pub fn new(offset: u32, value: u32) -> Self {
        Self { offset, value }
    }

    /// Flatten a register list into its wire representation.
    ///
    /// Produces the offset, value sequence in list order.
    pub fn flatten(registers: &[ConfigRegister]) -> Vec<u32> {
        let mut flat = Vec::with_capacity(registers.len() * 2);
        for register in registers {
            flat.push(register.offset);
            flat.push(register.value);
        }
        flat
    }
}
