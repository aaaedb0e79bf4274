use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use rand::seq::SliceRandom;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::definitions::RADIUS_MAX_PACKET_LENGTH;
use crate::packet::Packet;
use crate::registry::PacketCode;

use super::config::ClientConfig;
use super::errors::TransportError;

/// Sends a signed packet and awaits the matching reply, retrying on timeout.
///
/// Holds one UDP socket connected to the authentication endpoint and a
/// second, unconnected socket used only to send accounting packets to the
/// accounting endpoint.
pub struct RadiusTransport {
    server_ip: IpAddr,
    auth_port: u16,
    acct_port: u16,
    socket_timeout: Duration,
    auth_socket: UdpSocket,
    acct_socket: UdpSocket,
}

impl RadiusTransport {
    /// Resolves `config.host()` (a literal IP parses directly; otherwise a
    /// DNS lookup runs and, if it returns multiple addresses, one is picked
    /// uniformly at random), opens a UDP socket of the matching address
    /// family connected to the authentication endpoint, and a second
    /// unconnected socket for accounting sends. If `config.local_endpoint()`
    /// is set, both sockets bind to it first; its address family must match
    /// the resolved server address.
    pub async fn connect(config: &ClientConfig) -> Result<Self, TransportError> {
        let server_ip = resolve_host(config.host()).await?;

        if let Some(local) = config.local_endpoint() {
            if local.is_ipv4() != server_ip.is_ipv4() {
                return Err(TransportError::InvalidArgument(format!(
                    "local endpoint {} address family does not match resolved server address {}",
                    local, server_ip
                )));
            }
        }

        let bind_addr = config.local_endpoint().unwrap_or_else(|| {
            if server_ip.is_ipv4() {
                SocketAddr::from(([0, 0, 0, 0], 0))
            } else {
                SocketAddr::from(([0u16; 8], 0))
            }
        });

        let auth_socket = UdpSocket::bind(bind_addr).await?;
        auth_socket
            .connect(SocketAddr::new(server_ip, config.auth_port()))
            .await?;

        let acct_socket = UdpSocket::bind(bind_addr).await?;

        Ok(RadiusTransport {
            server_ip,
            auth_port: config.auth_port(),
            acct_port: config.acct_port(),
            socket_timeout: config.socket_timeout(),
            auth_socket,
            acct_socket,
        })
    }

    /// Sends `packet` and waits for the correlated reply, retrying up to
    /// `max_attempts` times with `socket_timeout` per attempt. Status-Server
    /// "pings" conventionally pass `max_attempts = 1` per RFC 5997.
    ///
    /// A reply is accepted only if it comes from the server's address, has
    /// the same Identifier as `packet`, passes structural validation, and —
    /// when it carries a Message-Authenticator attribute — verifies under
    /// `secret`; anything else is discarded and the per-attempt wait
    /// continues. A reply with no Message-Authenticator attribute at all is
    /// not rejected on that basis alone, since not every reply Code carries
    /// one (spec.md §4.4). Returns `Ok(None)` (the "no response" sentinel)
    /// after exhausting all attempts without a match, and `Err(Cancelled)`
    /// if `cancel` fires first.
    pub async fn send_and_receive(
        &self,
        packet: &Packet,
        secret: &[u8],
        max_attempts: u32,
        mut cancel: oneshot::Receiver<()>,
    ) -> Result<Option<Packet>, TransportError> {
        if max_attempts == 0 {
            return Err(TransportError::InvalidArgument(
                "max_attempts must be at least 1".into(),
            ));
        }

        let is_accounting = packet.code_enum() == Some(PacketCode::AccountingRequest);
        let mut buf = [0u8; RADIUS_MAX_PACKET_LENGTH];

        for attempt in 1..=max_attempts {
            debug!(attempt, code = %packet.code_name(), "sending RADIUS request");
            self.send(packet, is_accounting).await?;

            let deadline = Instant::now() + self.socket_timeout;

            loop {
                let remaining = deadline.saturating_duration_since(Instant::now());
                if remaining.is_zero() {
                    debug!(attempt, "per-attempt timeout elapsed, no matching reply");
                    break;
                }

                tokio::select! {
                    _ = &mut cancel => {
                        return Err(TransportError::Cancelled);
                    }
                    _ = tokio::time::sleep(remaining) => {
                        debug!(attempt, "per-attempt timeout elapsed, no matching reply");
                        break;
                    }
                    result = self.recv(&mut buf, is_accounting) => {
                        let (n, from) = result?;
                        let expected_port = if is_accounting { self.acct_port } else { self.auth_port };
                        if from.ip() != self.server_ip || from.port() != expected_port {
                            warn!(from = %from, "discarding reply from unexpected address");
                            continue;
                        }

                        let candidate = Packet::parse(&buf[..n]);
                        if candidate.identifier() != packet.identifier() {
                            warn!(
                                expected = packet.identifier(),
                                got = candidate.identifier(),
                                "discarding reply with mismatched Identifier"
                            );
                            continue;
                        }
                        if !candidate.is_valid() {
                            warn!("discarding structurally invalid reply");
                            continue;
                        }
                        if Packet::find_attribute(
                            candidate.as_bytes(),
                            crate::registry::attr_type::MESSAGE_AUTHENTICATOR,
                        )
                        .is_some()
                            && !candidate.verify_message_authenticator(secret)
                        {
                            warn!("discarding reply with invalid Message-Authenticator");
                            continue;
                        }

                        return Ok(Some(candidate));
                    }
                }
            }
        }

        Ok(None)
    }

    /// Sends a Status-Server "ping" (RFC 5997 §3): a fresh Status-Server
    /// packet carrying Message-Authenticator, signed with the Access-Request
    /// Authenticator strategy. Per RFC 5997, no retransmission is permitted,
    /// so this always calls `send_and_receive` with `max_attempts = 1`
    /// regardless of any retry policy a caller might use elsewhere.
    pub async fn ping(&self, secret: &[u8]) -> Result<Option<Packet>, TransportError> {
        let mut packet = Packet::create(PacketCode::StatusServer, None);
        packet.set_message_authenticator(secret)?;
        packet.set_authenticator(secret, None)?;

        let (_keep_alive, cancel_rx) = oneshot::channel();
        self.send_and_receive(&packet, secret, 1, cancel_rx).await
    }

    async fn send(&self, packet: &Packet, is_accounting: bool) -> Result<(), TransportError> {
        if is_accounting {
            self.acct_socket
                .send_to(packet.as_bytes(), SocketAddr::new(self.server_ip, self.acct_port))
                .await?;
        } else {
            self.auth_socket.send(packet.as_bytes()).await?;
        }
        Ok(())
    }

    async fn recv(
        &self,
        buf: &mut [u8],
        is_accounting: bool,
    ) -> Result<(usize, SocketAddr), TransportError> {
        if is_accounting {
            Ok(self.acct_socket.recv_from(buf).await?)
        } else {
            let n = self.auth_socket.recv(buf).await?;
            Ok((n, SocketAddr::new(self.server_ip, self.auth_port)))
        }
    }
}

/// Resolves a host string to a single IP address. A literal IP parses
/// directly; otherwise a DNS lookup runs and, given multiple results, one is
/// chosen uniformly at random.
async fn resolve_host(host: &str) -> Result<IpAddr, TransportError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(ip);
    }

    let addrs: Vec<SocketAddr> = tokio::net::lookup_host((host, 0))
        .await
        .map_err(TransportError::NetworkError)?
        .collect();

    addrs
        .choose(&mut rand::thread_rng())
        .map(|addr| addr.ip())
        .ok_or_else(|| TransportError::InvalidArgument(format!("could not resolve host {}", host)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::attr_type;

    #[tokio::test]
    async fn literal_ip_host_resolves_without_dns() {
        let ip = resolve_host("127.0.0.1").await.unwrap();
        assert_eq!(ip, "127.0.0.1".parse::<IpAddr>().unwrap());
    }

    #[tokio::test]
    async fn correlator_drops_alien_identifier_then_accepts_correct_reply() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let responder_addr = responder.local_addr().unwrap();

        let config = ClientConfig::new(responder_addr.ip().to_string(), "testing123")
            .unwrap()
            .with_auth_port(responder_addr.port())
            .unwrap()
            .with_socket_timeout(Duration::from_millis(500))
            .unwrap();

        let transport = RadiusTransport::connect(&config).await.unwrap();

        let mut request = Packet::create(PacketCode::AccessRequest, Some(42));
        request
            .append(crate::attribute::Attribute::from_string(attr_type::USER_NAME, "alice").unwrap())
            .unwrap();
        request.set_authenticator(b"testing123", None).unwrap();

        let identifier = request.identifier();

        let responder_task = tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            let (n, from) = responder.recv_from(&mut buf).await.unwrap();
            let _ = n;

            // Alien reply: wrong Identifier, sent immediately.
            let mut alien = Packet::create(PacketCode::AccessAccept, Some(identifier.wrapping_add(1)));
            alien
                .set_authenticator(b"testing123", Some([0u8; 16]))
                .unwrap();
            responder.send_to(alien.as_bytes(), from).await.unwrap();

            // Correct reply, after a short delay.
            tokio::time::sleep(Duration::from_millis(50)).await;
            let mut correct = Packet::create(PacketCode::AccessAccept, Some(identifier));
            correct
                .set_authenticator(b"testing123", Some([0u8; 16]))
                .unwrap();
            responder.send_to(correct.as_bytes(), from).await.unwrap();
        });

        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let reply = transport
            .send_and_receive(&request, b"testing123", 1, cancel_rx)
            .await
            .unwrap();

        responder_task.await.unwrap();

        let reply = reply.expect("expected a matched reply");
        assert_eq!(reply.identifier(), identifier);
        assert_eq!(reply.code_enum(), Some(PacketCode::AccessAccept));
    }

    #[tokio::test]
    async fn no_response_sentinel_after_exhausting_attempts() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let responder_addr = responder.local_addr().unwrap();
        // Never reply; the socket is just held open so the port is real.

        let config = ClientConfig::new(responder_addr.ip().to_string(), "testing123")
            .unwrap()
            .with_auth_port(responder_addr.port())
            .unwrap()
            .with_socket_timeout(Duration::from_millis(50))
            .unwrap();

        let transport = RadiusTransport::connect(&config).await.unwrap();
        let request = Packet::create(PacketCode::StatusServer, Some(1));

        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let reply = transport
            .send_and_receive(&request, b"testing123", 1, cancel_rx)
            .await
            .unwrap();
        assert!(reply.is_none());
    }

    #[tokio::test]
    async fn ping_sends_status_server_with_message_authenticator_and_does_not_retry() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let responder_addr = responder.local_addr().unwrap();

        let config = ClientConfig::new(responder_addr.ip().to_string(), "testing123")
            .unwrap()
            .with_auth_port(responder_addr.port())
            .unwrap()
            .with_socket_timeout(Duration::from_millis(500))
            .unwrap();

        let transport = RadiusTransport::connect(&config).await.unwrap();

        let responder_task = tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            let (n, from) = responder.recv_from(&mut buf).await.unwrap();
            let request = Packet::parse(&buf[..n]);
            assert_eq!(request.code_enum(), Some(PacketCode::StatusServer));
            assert!(request.verify_message_authenticator(b"testing123"));

            let mut reply = Packet::create(PacketCode::AccessAccept, Some(request.identifier()));
            reply
                .set_authenticator(b"testing123", Some(request.authenticator().try_into().unwrap()))
                .unwrap();
            responder.send_to(reply.as_bytes(), from).await.unwrap();
        });

        let reply = transport.ping(b"testing123").await.unwrap();
        responder_task.await.unwrap();

        assert!(reply.is_some());
    }

    #[tokio::test]
    async fn reply_with_invalid_message_authenticator_is_discarded() {
        let responder = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let responder_addr = responder.local_addr().unwrap();

        let config = ClientConfig::new(responder_addr.ip().to_string(), "testing123")
            .unwrap()
            .with_auth_port(responder_addr.port())
            .unwrap()
            .with_socket_timeout(Duration::from_millis(500))
            .unwrap();

        let transport = RadiusTransport::connect(&config).await.unwrap();

        let mut request = Packet::create(PacketCode::AccessRequest, Some(11));
        request
            .append(crate::attribute::Attribute::from_string(attr_type::USER_NAME, "alice").unwrap())
            .unwrap();
        request.set_message_authenticator(b"testing123").unwrap();
        request.set_authenticator(b"testing123", None).unwrap();

        let identifier = request.identifier();

        let responder_task = tokio::spawn(async move {
            let mut buf = [0u8; 4096];
            let (n, from) = responder.recv_from(&mut buf).await.unwrap();
            let _ = n;

            // First reply: right Identifier, but Message-Authenticator signed
            // with the wrong secret, so it must be discarded rather than
            // accepted.
            let mut bogus = Packet::create(PacketCode::AccessAccept, Some(identifier));
            bogus.set_message_authenticator(b"wrong-secret").unwrap();
            bogus
                .set_authenticator(b"testing123", Some([0u8; 16]))
                .unwrap();
            responder.send_to(bogus.as_bytes(), from).await.unwrap();

            // Second reply, after a short delay: correctly signed.
            tokio::time::sleep(Duration::from_millis(50)).await;
            let mut correct = Packet::create(PacketCode::AccessAccept, Some(identifier));
            correct.set_message_authenticator(b"testing123").unwrap();
            correct
                .set_authenticator(b"testing123", Some([0u8; 16]))
                .unwrap();
            responder.send_to(correct.as_bytes(), from).await.unwrap();
        });

        let (_cancel_tx, cancel_rx) = oneshot::channel();
        let reply = transport
            .send_and_receive(&request, b"testing123", 1, cancel_rx)
            .await
            .unwrap();

        responder_task.await.unwrap();

        let reply = reply.expect("expected the correctly-signed reply to be accepted");
        assert!(reply.verify_message_authenticator(b"testing123"));
    }
}
