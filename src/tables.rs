//! Lookup tables for every enumerated field of the extended header.
//!
//! All lookups are total: a key without an entry resolves to the empty string. Callers render
//! the empty label as-is (or skip the entry where the output format requires a name), they never
//! treat it as a failure.

/// Label used by lookups for keys that have no entry.
pub const UNKNOWN: &str = "";

/// Title category, keyed by bits 32..48 of the program id.
pub fn category_name(code: u16) -> &'static str {
    match code {
        0x0000 => "Application",
        0x0010 => "SystemApplication",
        0x0030 => "Applet",
        0x0138 => "Firmware",
        0x0130 => "Base",
        0x0001 => "DlpChild",
        0x0002 => "Demo",
        0x0003 => "Contents",
        0x001B => "SystemContents",
        0x009B => "SharedContents",
        0x008C => "AddOnContents",
        0x000E => "Patch",
        0x00DB => "AutoUpdateContents",
        _ => UNKNOWN,
    }
}

/// New 3DS system mode, keyed by the low nibble of the first ARM11 flag byte.
pub fn system_mode_ext_name(mode: u8) -> &'static str {
    match mode {
        0 => "Legacy",
        1 => "124MB",
        2 => "178MB",
        3 => "124MB",
        _ => UNKNOWN,
    }
}

/// Old 3DS system mode, keyed by the high nibble of the third ARM11 flag byte.
pub fn system_mode_name(mode: u8) -> &'static str {
    match mode {
        0 => "64MB",
        2 => "96MB",
        3 => "80MB",
        4 => "72MB",
        5 => "32MB",
        _ => UNKNOWN,
    }
}

/// Number of filesystem access bits with a defined permission name.
pub const FILESYSTEM_ACCESS_BITS: u8 = 22;

/// FS:USER archive permission, keyed by bit index in the filesystem access word.
pub fn filesystem_access_name(bit: u8) -> &'static str {
    match bit {
        0 => "CategorySystemApplication",
        1 => "CategoryHardwareCheck",
        2 => "CategoryFileSystemTool",
        3 => "Debug",
        4 => "TwlCardBackup",
        5 => "TwlNandData",
        6 => "Boss",
        7 => "DirectSdmc",
        8 => "Core",
        9 => "CtrNandRo",
        10 => "CtrNandRw",
        11 => "CtrNandRoWrite",
        12 => "CategorySystemSettings",
        13 => "CardBoard",
        14 => "ExportImportIvs",
        15 => "DirectSdmcWrite",
        16 => "SwitchCleanup",
        17 => "SaveDataMove",
        18 => "Shop",
        19 => "Shell",
        20 => "CategoryHomeMenu",
        21 => "SeedDB",
        _ => UNKNOWN,
    }
}

pub const RESOURCE_LIMIT_APPLICATION: &str = "application";

pub fn resource_limit_category_name(category: u8) -> &'static str {
    match category {
        0 => RESOURCE_LIMIT_APPLICATION,
        1 => "sysapplet",
        2 => "libapplet",
        3 => "other",
        _ => UNKNOWN,
    }
}

/// Memory region, keyed by bits 8..12 of the "other capabilities" kernel descriptor.
pub fn memory_type_name(memory_type: u8) -> &'static str {
    match memory_type {
        1 => "Application",
        2 => "System",
        3 => "Base",
        _ => UNKNOWN,
    }
}

static SVC_NAMES: [&str; 0x80] = [
    "",                              // 00
    "ControlMemory",                 // 01
    "QueryMemory",                   // 02
    "ExitProcess",                   // 03
    "GetProcessAffinityMask",        // 04
    "SetProcessAffinityMask",        // 05
    "GetProcessIdealProcessor",      // 06
    "SetProcessIdealProcessor",      // 07
    "CreateThread",                  // 08
    "ExitThread",                    // 09
    "SleepThread",                   // 0A
    "GetThreadPriority",             // 0B
    "SetThreadPriority",             // 0C
    "GetThreadAffinityMask",         // 0D
    "SetThreadAffinityMask",         // 0E
    "GetThreadIdealProcessor",       // 0F
    "SetThreadIdealProcessor",       // 10
    "GetCurrentProcessorNumber",     // 11
    "Run",                           // 12
    "CreateMutex",                   // 13
    "ReleaseMutex",                  // 14
    "CreateSemaphore",               // 15
    "ReleaseSemaphore",              // 16
    "CreateEvent",                   // 17
    "SignalEvent",                   // 18
    "ClearEvent",                    // 19
    "CreateTimer",                   // 1A
    "SetTimer",                      // 1B
    "CancelTimer",                   // 1C
    "ClearTimer",                    // 1D
    "CreateMemoryBlock",             // 1E
    "MapMemoryBlock",                // 1F
    "UnmapMemoryBlock",              // 20
    "CreateAddressArbiter",          // 21
    "ArbitrateAddress",              // 22
    "CloseHandle",                   // 23
    "WaitSynchronization1",          // 24
    "WaitSynchronizationN",          // 25
    "SignalAndWait",                 // 26
    "DuplicateHandle",               // 27
    "GetSystemTick",                 // 28
    "GetHandleInfo",                 // 29
    "GetSystemInfo",                 // 2A
    "GetProcessInfo",                // 2B
    "GetThreadInfo",                 // 2C
    "ConnectToPort",                 // 2D
    "SendSyncRequest1",              // 2E
    "SendSyncRequest2",              // 2F
    "SendSyncRequest3",              // 30
    "SendSyncRequest4",              // 31
    "SendSyncRequest",               // 32
    "OpenProcess",                   // 33
    "OpenThread",                    // 34
    "GetProcessId",                  // 35
    "GetProcessIdOfThread",          // 36
    "GetThreadId",                   // 37
    "GetResourceLimit",              // 38
    "GetResourceLimitLimitValues",   // 39
    "GetResourceLimitCurrentValues", // 3A
    "GetThreadContext",              // 3B
    "Break",                         // 3C
    "OutputDebugString",             // 3D
    "ControlPerformanceCounter",     // 3E
    "",                              // 3F
    "",                              // 40
    "",                              // 41
    "",                              // 42
    "",                              // 43
    "",                              // 44
    "",                              // 45
    "",                              // 46
    "CreatePort",                    // 47
    "CreateSessionToPort",           // 48
    "CreateSession",                 // 49
    "AcceptSession",                 // 4A
    "ReplyAndReceive1",              // 4B
    "ReplyAndReceive2",              // 4C
    "ReplyAndReceive3",              // 4D
    "ReplyAndReceive4",              // 4E
    "ReplyAndReceive",               // 4F
    "BindInterrupt",                 // 50
    "UnbindInterrupt",               // 51
    "InvalidateProcessDataCache",    // 52
    "StoreProcessDataCache",         // 53
    "FlushProcessDataCache",         // 54
    "StartInterProcessDma",          // 55
    "StopDma",                       // 56
    "GetDmaState",                   // 57
    "RestartDma",                    // 58
    "SetGpuProt",                    // 59
    "SetWifiEnabled",                // 5A
    "",                              // 5B
    "",                              // 5C
    "",                              // 5D
    "",                              // 5E
    "",                              // 5F
    "DebugActiveProcess",            // 60
    "BreakDebugProcess",             // 61
    "TerminateDebugProcess",         // 62
    "GetProcessDebugEvent",          // 63
    "ContinueDebugEvent",            // 64
    "GetProcessList",                // 65
    "GetThreadList",                 // 66
    "GetDebugThreadContext",         // 67
    "SetDebugThreadContext",         // 68
    "QueryDebugProcessMemory",       // 69
    "ReadProcessMemory",             // 6A
    "WriteProcessMemory",            // 6B
    "SetHardwareBreakPoint",         // 6C
    "GetDebugThreadParam",           // 6D
    "",                              // 6E
    "",                              // 6F
    "ControlProcessMemory",          // 70
    "MapProcessMemory",              // 71
    "UnmapProcessMemory",            // 72
    "CreateCodeSet",                 // 73
    "",                              // 74
    "CreateProcess",                 // 75
    "TerminateProcess",              // 76
    "SetProcessResourceLimits",      // 77
    "CreateResourceLimit",           // 78
    "SetResourceLimitValues",        // 79
    "AddCodeSegment",                // 7A
    "Backdoor",                      // 7B
    "KernelSetState",                // 7C
    "QueryProcessMemory",            // 7D
    "",                              // 7E
    "",                              // 7F
];

/// Supervisor call name. Ids past the table (a descriptor bucket can address up to 191) and
/// unassigned ids have no name.
pub fn svc_name(id: u32) -> &'static str {
    match SVC_NAMES.get(id as usize) {
        Some(name) => name,
        None => UNKNOWN,
    }
}

/// System module name for a dependency title id.
pub fn dependency_module_name(title_id: u64) -> &'static str {
    match title_id {
        0x0004_0130_0000_2402 => "ac",
        0x0004_0130_0000_3802 => "act",
        0x0004_0130_0000_1502 => "am",
        0x0004_0130_0000_3402 => "boss",
        0x0004_0130_0000_1602 => "camera",
        0x0004_0130_0000_2602 => "cecd",
        0x0004_0130_0000_1702 => "cfg",
        0x0004_0130_0000_1802 => "codec",
        0x0004_0130_0000_2702 => "csnd",
        0x0004_0130_0000_2802 => "dlp",
        0x0004_0130_0000_1A02 => "dsp",
        0x0004_0130_0000_3202 => "friends",
        0x0004_0130_0000_1B02 => "gpio",
        0x0004_0130_0000_1C02 => "gsp",
        0x0004_0130_0000_1D02 => "hid",
        0x0004_0130_0000_2902 => "http",
        0x0004_0130_0000_1E02 => "i2c",
        0x0004_0130_0000_3302 => "ir",
        0x0004_0130_0000_1F02 => "mcu",
        0x0004_0130_0000_2002 => "mic",
        0x0004_0130_0000_2B02 => "ndm",
        0x0004_0130_0000_3502 => "news",
        0x0004_0130_0000_4002 => "nfc",
        0x0004_0130_0000_2C02 => "nim",
        0x0004_0130_0000_2D02 => "nwm",
        0x0004_0130_0000_2102 => "pdn",
        0x0004_0130_0000_3102 => "ps",
        0x0004_0130_0000_2202 => "ptm",
        0x0004_0130_2000_4202 => "qtm",
        0x0004_0130_0000_3702 => "ro",
        0x0004_0130_0000_2E02 => "socket",
        0x0004_0130_0000_2302 => "spi",
        0x0004_0130_0000_2F02 => "ssl",
        _ => UNKNOWN,
    }
}
