#![allow(dead_code)]

use enumutil::enumeration;

macro_rules! powers_of_two {
    ($($name:ident: $repr:ty;)*) => {
        $(
            enumeration! {
                pub struct $name: $repr {
                    const One = 1;
                    const Two = 2;
                    const Four = 4;
                    const Eight = 8;
                }
            }
        )*
    };
}

powers_of_two! {
    U8Enum: u8;
    I8Enum: i8;
    U16Enum: u16;
    I16Enum: i16;
    U32Enum: u32;
    I32Enum: i32;
    U64Enum: u64;
    I64Enum: i64;
}

enumeration! {
    #[flags]
    /// File permissions.
    pub struct Permissions: u16 {
        const None = 0 => "No access";
        const Read = 1 => "Read access";
        const Write = 2 => "Write access";
        const Execute = 4;
        const ReadWrite = 3;
        const All = 7 => "Full access";
    }
}

enumeration! {
    pub struct Signed: i16 {
        const Minus = -1;
        const Zero = 0;
        const Alias = -1 => "Same as Minus";
        const Max = i16::MAX => "Largest value";
    }
}

enumeration! {
    #[flags]
    pub struct Wide: u64 {
        const Low = 1;
        const High = 1 << 63;
    }
}

enumeration! {
    pub struct Empty: i32 {}
}
