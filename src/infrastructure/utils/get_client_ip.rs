use actix_web::HttpRequest;

/// Resolve the caller identity used as the rate-limit key.
///
/// `X-Forwarded-For` is only consulted when the deployment says its proxy
/// sets it (`trust_x_forwarded_for`); otherwise the header is spoofable and
/// the peer address wins. The first hop in the header is the original client.
pub fn get_client_ip(req: &HttpRequest, trust_x_forwarded_for: bool) -> String {
    if trust_x_forwarded_for {
        let forwarded_client = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        if let Some(ip) = forwarded_client {
            return ip.to_string();
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
