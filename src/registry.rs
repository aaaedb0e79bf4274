//! The RADIUS packet-Code, attribute-Type, and enumeration registry. This
//! module is data, not logic: two lookup tables (Type → value category,
//! enumerated Type → named variants) plus the Code table. Grounded on RFC
//! 2865 §3 / §5, RFC 2866 §3 / §5, RFC 5176 §3, RFC 6929 §2.

use num_derive::FromPrimitive;

/// The wire shape used to decode an attribute's Value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueCategory {
    /// UTF-8 text.
    Text,
    /// Unsigned 32-bit big-endian integer, optionally a named enumeration.
    Integer,
    /// Unsigned 64-bit big-endian integer.
    Integer64,
    /// IPv4 (4 bytes) or IPv6 (16 bytes) address.
    Address,
    /// 32-bit Unix timestamp.
    Date,
    /// 1 tag byte + 3-byte big-endian code (RFC 2868 §3.1-3.2).
    TaggedTunnel,
    /// RFC 8044 §3.9 IPv4 prefix.
    Ipv4Prefix,
    /// RFC 3162 §2.3 / RFC 8044 §3.8 IPv6 prefix.
    Ipv6Prefix,
    /// Opaque bytes, hex-dumped when rendered.
    Octets,
}

/// Packet Codes (RFC 2865 §4.1, RFC 2866 §3, RFC 5176 §3, RFC 5997, and the
/// Livingston/Ascend extensions spec.md §6 names: Resource-Free/Query,
/// NAS-Reboot, Terminate-Session, Password-Expired, Event, IP-Address
/// Allocate/Release, and Protocol-Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum PacketCode {
    AccessRequest = 1,
    AccessAccept = 2,
    AccessReject = 3,
    AccountingRequest = 4,
    AccountingResponse = 5,
    AccessChallenge = 11,
    StatusServer = 12,
    StatusClient = 13,
    ResourceFreeRequest = 21,
    ResourceFreeResponse = 22,
    ResourceQueryRequest = 23,
    ResourceQueryResponse = 24,
    NasRebootRequest = 26,
    NasRebootResponse = 27,
    TerminateSession = 31,
    PasswordExpired = 32,
    EventRequest = 33,
    EventResponse = 34,
    DisconnectRequest = 40,
    DisconnectAck = 41,
    DisconnectNak = 42,
    CoaRequest = 43,
    CoaAck = 44,
    CoaNak = 45,
    IpAddressAllocate = 50,
    IpAddressRelease = 51,
    ProtocolError = 52,
}

impl PacketCode {
    /// Human-readable Code name.
    pub fn name(self) -> &'static str {
        match self {
            PacketCode::AccessRequest => "Access-Request",
            PacketCode::AccessAccept => "Access-Accept",
            PacketCode::AccessReject => "Access-Reject",
            PacketCode::AccountingRequest => "Accounting-Request",
            PacketCode::AccountingResponse => "Accounting-Response",
            PacketCode::AccessChallenge => "Access-Challenge",
            PacketCode::StatusServer => "Status-Server",
            PacketCode::StatusClient => "Status-Client",
            PacketCode::ResourceFreeRequest => "Resource-Free-Request",
            PacketCode::ResourceFreeResponse => "Resource-Free-Response",
            PacketCode::ResourceQueryRequest => "Resource-Query-Request",
            PacketCode::ResourceQueryResponse => "Resource-Query-Response",
            PacketCode::NasRebootRequest => "NAS-Reboot-Request",
            PacketCode::NasRebootResponse => "NAS-Reboot-Response",
            PacketCode::TerminateSession => "Terminate-Session",
            PacketCode::PasswordExpired => "Password-Expired",
            PacketCode::EventRequest => "Event-Request",
            PacketCode::EventResponse => "Event-Response",
            PacketCode::DisconnectRequest => "Disconnect-Request",
            PacketCode::DisconnectAck => "Disconnect-ACK",
            PacketCode::DisconnectNak => "Disconnect-NAK",
            PacketCode::CoaRequest => "CoA-Request",
            PacketCode::CoaAck => "CoA-ACK",
            PacketCode::CoaNak => "CoA-NAK",
            PacketCode::IpAddressAllocate => "IP-Address-Allocate",
            PacketCode::IpAddressRelease => "IP-Address-Release",
            PacketCode::ProtocolError => "Protocol-Error",
        }
    }
}

impl std::fmt::Display for PacketCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Well-known standard attribute Types (RFC 2865 §5, RFC 2866 §5, RFC 2868
/// §3, RFC 6929 §2). Not exhaustive over every named attribute in 1-190 /
/// 241-246, but the category table below covers the full numeric range by
/// shape, which is what the codec needs to decode any attribute without a
/// name.
pub mod attr_type {
    pub const USER_NAME: u8 = 1;
    pub const USER_PASSWORD: u8 = 2;
    pub const CHAP_PASSWORD: u8 = 3;
    pub const NAS_IP_ADDRESS: u8 = 4;
    pub const NAS_PORT: u8 = 5;
    pub const SERVICE_TYPE: u8 = 6;
    pub const FRAMED_PROTOCOL: u8 = 7;
    pub const FRAMED_IP_ADDRESS: u8 = 8;
    pub const FRAMED_IP_NETMASK: u8 = 9;
    pub const FILTER_ID: u8 = 11;
    pub const FRAMED_MTU: u8 = 12;
    pub const REPLY_MESSAGE: u8 = 18;
    pub const CALLBACK_NUMBER: u8 = 19;
    pub const STATE: u8 = 24;
    pub const CLASS: u8 = 25;
    pub const VENDOR_SPECIFIC: u8 = 26;
    pub const SESSION_TIMEOUT: u8 = 27;
    pub const IDLE_TIMEOUT: u8 = 28;
    pub const CALLED_STATION_ID: u8 = 30;
    pub const CALLING_STATION_ID: u8 = 31;
    pub const NAS_IDENTIFIER: u8 = 32;
    pub const ACCT_STATUS_TYPE: u8 = 40;
    pub const ACCT_DELAY_TIME: u8 = 41;
    pub const ACCT_INPUT_OCTETS: u8 = 42;
    pub const ACCT_OUTPUT_OCTETS: u8 = 43;
    pub const ACCT_SESSION_ID: u8 = 44;
    pub const ACCT_AUTHENTIC: u8 = 45;
    pub const ACCT_SESSION_TIME: u8 = 46;
    pub const ACCT_TERMINATE_CAUSE: u8 = 49;
    pub const EVENT_TIMESTAMP: u8 = 55;
    pub const NAS_PORT_TYPE: u8 = 61;
    pub const TUNNEL_TYPE: u8 = 64;
    pub const TUNNEL_MEDIUM_TYPE: u8 = 65;
    pub const TUNNEL_PASSWORD: u8 = 69;
    pub const MESSAGE_AUTHENTICATOR: u8 = 80;
    pub const TUNNEL_PRIVATE_GROUP_ID: u8 = 81;
    pub const NAS_PORT_ID: u8 = 87;
    pub const FRAMED_POOL: u8 = 88;
    pub const NAS_IPV6_ADDRESS: u8 = 95;
    pub const FRAMED_INTERFACE_ID: u8 = 96;
    pub const FRAMED_IPV6_PREFIX: u8 = 97;
    pub const ERROR_CAUSE: u8 = 101;
    pub const FRAMED_IPV6_ADDRESS: u8 = 168;
    pub const FRAMED_IPV4_PREFIX: u8 = 169;
}

/// Maps an attribute Type code to the wire shape used to decode its Value.
/// Types not named here default to `ValueCategory::Octets`, the hex-dump
/// fallback for unknown/opaque types.
pub fn category_for_type(attr_type: u8) -> ValueCategory {
    use attr_type::*;

    match attr_type {
        USER_NAME | FILTER_ID | REPLY_MESSAGE | CALLBACK_NUMBER | STATE | CLASS
        | CALLED_STATION_ID | CALLING_STATION_ID | NAS_IDENTIFIER | ACCT_SESSION_ID
        | NAS_PORT_ID | FRAMED_POOL | TUNNEL_PRIVATE_GROUP_ID => ValueCategory::Text,

        NAS_IP_ADDRESS | FRAMED_IP_ADDRESS | FRAMED_IP_NETMASK | NAS_IPV6_ADDRESS
        | FRAMED_IPV6_ADDRESS => ValueCategory::Address,

        EVENT_TIMESTAMP => ValueCategory::Date,

        ACCT_INPUT_OCTETS | ACCT_OUTPUT_OCTETS => ValueCategory::Integer,

        TUNNEL_TYPE | TUNNEL_MEDIUM_TYPE => ValueCategory::TaggedTunnel,

        FRAMED_IPV6_PREFIX => ValueCategory::Ipv6Prefix,
        FRAMED_IPV4_PREFIX => ValueCategory::Ipv4Prefix,

        USER_PASSWORD | CHAP_PASSWORD | TUNNEL_PASSWORD | MESSAGE_AUTHENTICATOR
        | FRAMED_INTERFACE_ID => ValueCategory::Octets,

        NAS_PORT | SERVICE_TYPE | FRAMED_PROTOCOL | FRAMED_MTU | SESSION_TIMEOUT
        | IDLE_TIMEOUT | ACCT_STATUS_TYPE | ACCT_DELAY_TIME | ACCT_AUTHENTIC
        | ACCT_SESSION_TIME | ACCT_TERMINATE_CAUSE | NAS_PORT_TYPE | ERROR_CAUSE => {
            ValueCategory::Integer
        }

        _ => ValueCategory::Octets,
    }
}

/// Service-Type enumeration (RFC 2865 §5.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ServiceType {
    Login = 1,
    Framed = 2,
    CallbackLogin = 3,
    CallbackFramed = 4,
    Outbound = 5,
    Administrative = 6,
    NasPrompt = 7,
    AuthenticateOnly = 8,
    CallbackNasPrompt = 9,
    CallCheck = 10,
    CallbackAdministrative = 11,
}

/// NAS-Port-Type enumeration (RFC 2865 §5.41).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum NasPortType {
    Async = 0,
    Sync = 1,
    Isdn = 2,
    IsdnV120 = 3,
    IsdnV110 = 4,
    Virtual = 5,
    Piafs = 6,
    HdlcClearChannel = 7,
    X25 = 8,
    Xot = 9,
    FlatRateDsl = 10,
    CableModem = 11,
    EthernetPort = 12,
    Ethernet = 15,
    Wireless80211 = 19,
}

/// Acct-Status-Type enumeration (RFC 2866 §5.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum AcctStatusType {
    Start = 1,
    Stop = 2,
    InterimUpdate = 3,
    AccountingOn = 7,
    AccountingOff = 8,
}

/// Acct-Terminate-Cause enumeration (RFC 2866 §5.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum AcctTerminateCause {
    UserRequest = 1,
    LostCarrier = 2,
    LostService = 3,
    IdleTimeout = 4,
    SessionTimeout = 5,
    AdminReset = 6,
    AdminReboot = 7,
    PortError = 8,
    NasError = 9,
    NasRequest = 10,
    NasReboot = 11,
    PortUnneeded = 12,
    PortPreempted = 13,
    PortSuspended = 14,
    ServiceUnavailable = 15,
    Callback = 16,
    UserError = 17,
    HostRequest = 18,
}

/// Tunnel-Type enumeration (RFC 2868 §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum TunnelType {
    Ppt = 1,
    L2f = 2,
    L2tp = 3,
    Atmp = 4,
    Vtp = 5,
    Ah = 6,
    Ip = 7,
    MinIpIp = 8,
    Esp = 9,
    Gre = 10,
    Dvs = 11,
    IpInIp = 12,
    Vlan = 13,
}

/// Tunnel-Medium-Type enumeration (RFC 2868 §3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum TunnelMediumType {
    Ipv4 = 1,
    Ipv6 = 2,
    Nsap = 3,
    Hdlc = 4,
    Bbn1822 = 5,
    Ieee802 = 6,
    E163 = 7,
    E164 = 8,
    F69 = 9,
    X121 = 10,
    Ipx = 11,
    Appletalk = 12,
    DecnetIv = 13,
    BanyanVines = 14,
    E164NsapSubaddress = 15,
}

/// Error-Cause enumeration (RFC 5176 §3.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub enum ErrorCause {
    ResidualSessionContext = 201,
    InvalidEapPacket = 202,
    UnsupportedAttribute = 401,
    MissingAttribute = 402,
    NasIdentificationMismatch = 403,
    InvalidRequest = 404,
    UnsupportedService = 405,
    UnsupportedExtension = 406,
    InvalidAttributeValue = 407,
    AdministrativelyProhibited = 501,
    RequestNotRoutable = 502,
    SessionContextNotFound = 503,
    SessionContextNotRemovable = 504,
    OtherProxyProcessingError = 505,
    ResourcesUnavailable = 506,
    RequestInitiated = 507,
    MultipleSessionSelectionUnsupported = 508,
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::FromPrimitive;

    #[test]
    fn known_types_resolve_to_expected_category() {
        assert_eq!(category_for_type(attr_type::USER_NAME), ValueCategory::Text);
        assert_eq!(
            category_for_type(attr_type::NAS_IP_ADDRESS),
            ValueCategory::Address
        );
        assert_eq!(
            category_for_type(attr_type::TUNNEL_TYPE),
            ValueCategory::TaggedTunnel
        );
    }

    #[test]
    fn unknown_type_falls_back_to_octets() {
        assert_eq!(category_for_type(250), ValueCategory::Octets);
    }

    #[test]
    fn packet_code_from_primitive() {
        assert_eq!(PacketCode::from_u8(1), Some(PacketCode::AccessRequest));
        assert_eq!(PacketCode::from_u8(4), Some(PacketCode::AccountingRequest));
        assert_eq!(PacketCode::from_u8(99), None);
    }
}
