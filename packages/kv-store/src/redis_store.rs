//! Redis-backed store.
//!
//! Redis in Gopher mode serves a selector by looking up the key of the same
//! name, so the compiled keys are written verbatim with `SET`.

use bytes::Bytes;

use crate::{KvReader, KvWriter, StoreError};

/// A synchronous connection to a Redis server.
pub struct RedisStore {
    connection: redis::Connection,
    address: String,
}

impl RedisStore {
    /// Open a connection to `host:port`.
    ///
    /// The connection is established eagerly so that an unreachable server
    /// fails here rather than on the first write.
    pub fn connect(host: &str, port: u16) -> Result<Self, StoreError> {
        let client = redis::Client::open((host.to_string(), port))?;
        let connection = client.get_connection()?;
        Ok(Self {
            connection,
            address: format!("{}:{}", host, port),
        })
    }

    /// The `host:port` this store writes to.
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl KvWriter for RedisStore {
    fn set(&mut self, key: &str, value: Bytes) -> Result<(), StoreError> {
        redis::cmd("SET")
            .arg(key)
            .arg(&value[..])
            .query::<()>(&mut self.connection)?;
        Ok(())
    }
}

impl KvReader for RedisStore {
    fn get(&mut self, key: &str) -> Result<Option<Bytes>, StoreError> {
        let value: Option<Vec<u8>> = redis::cmd("GET")
            .arg(key)
            .query(&mut self.connection)?;
        Ok(value.map(Bytes::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_to_closed_port_is_transport_error() {
        // Bind and drop a listener to find a port nothing is listening on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        match RedisStore::connect("127.0.0.1", port) {
            Err(StoreError::Transport(_)) => {}
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("connected to a closed port"),
        }
    }
}
