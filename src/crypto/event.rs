//! Callback event signature and AES-256-CBC message encryption

use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use aes::Aes256;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD as BASE64};
use base64::Engine;
use sha1::{Digest, Sha1};

use crate::error::WechatError;

type Aes256CbcDecryptor = cbc::Decryptor<Aes256>;
type Aes256CbcEncryptor = cbc::Encryptor<Aes256>;

/// WeChat pads to 32 bytes, not the AES block size.
const PAD_BLOCK_SIZE: usize = 32;
const NONCE_LEN: usize = 16;

/// The 43-character EncodingAESKey is not canonical base64; its last
/// character may carry non-zero trailing bits.
const AES_KEY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Callback signature: SHA-1 over the lexicographically sorted token and
/// items, as lowercase hex.
pub fn sign_with_sha1(token: &str, items: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(items.len() + 1);
    parts.push(token);
    parts.extend_from_slice(items);
    parts.sort_unstable();

    let mut hasher = Sha1::new();
    for part in parts {
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

fn decode_aes_key(encoding_aes_key: &str) -> Result<Vec<u8>, WechatError> {
    let key = AES_KEY_ENGINE
        .decode(format!("{}=", encoding_aes_key))
        .map_err(|e| WechatError::Crypto(format!("Invalid encoding_aes_key: {}", e)))?;

    if key.len() != 32 {
        return Err(WechatError::Crypto(format!(
            "Invalid key length: expected 32, got {}",
            key.len()
        )));
    }
    Ok(key)
}

/// Decrypt a callback message and return the inner message bytes.
///
/// Plaintext layout: `random(16) | msg_len(u32 BE) | msg | receive_id`.
/// `receive_id` must equal the expected corp id / app id.
pub fn decrypt(
    receive_id: &str,
    encoding_aes_key: &str,
    ciphertext: &str,
) -> Result<Vec<u8>, WechatError> {
    let key = decode_aes_key(encoding_aes_key)?;

    let mut buffer = BASE64
        .decode(ciphertext)
        .map_err(|e| WechatError::Crypto(format!("Invalid ciphertext: {}", e)))?;

    if buffer.is_empty() || buffer.len() % 16 != 0 {
        return Err(WechatError::Crypto(format!(
            "Invalid ciphertext length: {}",
            buffer.len()
        )));
    }

    let decryptor = Aes256CbcDecryptor::new(key.as_slice().into(), key[..16].into());
    let plain = decryptor
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|e| WechatError::Crypto(format!("Decryption failed: {:?}", e)))?;

    let plain = strip_padding(plain)?;

    if plain.len() < NONCE_LEN + 4 {
        return Err(WechatError::Crypto("Decrypted message too short".into()));
    }

    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&plain[NONCE_LEN..NONCE_LEN + 4]);
    let msg_len = u32::from_be_bytes(len_bytes) as usize;

    let msg_start = NONCE_LEN + 4;
    let msg_end = msg_start
        .checked_add(msg_len)
        .filter(|end| *end <= plain.len())
        .ok_or_else(|| WechatError::Crypto("Invalid message length".into()))?;

    let got_id = &plain[msg_end..];
    if got_id != receive_id.as_bytes() {
        return Err(WechatError::Crypto(format!(
            "Receive id mismatch: expected {}, got {}",
            receive_id,
            String::from_utf8_lossy(got_id)
        )));
    }

    Ok(plain[msg_start..msg_end].to_vec())
}

/// Encrypt a message for a passive encrypted reply, returning base64.
///
/// `nonce` must be exactly 16 bytes.
pub fn encrypt(
    receive_id: &str,
    encoding_aes_key: &str,
    nonce: &[u8],
    message: &[u8],
) -> Result<String, WechatError> {
    if nonce.len() != NONCE_LEN {
        return Err(WechatError::Crypto(format!(
            "Invalid nonce length: expected {}, got {}",
            NONCE_LEN,
            nonce.len()
        )));
    }
    let msg_len = u32::try_from(message.len())
        .map_err(|_| WechatError::Crypto("Message too long".into()))?;

    let key = decode_aes_key(encoding_aes_key)?;

    let mut plain = Vec::with_capacity(NONCE_LEN + 4 + message.len() + receive_id.len() + 32);
    plain.extend_from_slice(nonce);
    plain.extend_from_slice(&msg_len.to_be_bytes());
    plain.extend_from_slice(message);
    plain.extend_from_slice(receive_id.as_bytes());

    let pad = PAD_BLOCK_SIZE - plain.len() % PAD_BLOCK_SIZE;
    plain.extend(std::iter::repeat(pad as u8).take(pad));

    let len = plain.len();
    let encryptor = Aes256CbcEncryptor::new(key.as_slice().into(), key[..16].into());
    let encrypted = encryptor
        .encrypt_padded_mut::<NoPadding>(&mut plain, len)
        .map_err(|e| WechatError::Crypto(format!("Encryption failed: {:?}", e)))?;

    Ok(BASE64.encode(encrypted))
}

fn strip_padding(plain: &[u8]) -> Result<&[u8], WechatError> {
    let pad = plain.last().copied().unwrap_or(0) as usize;
    if pad == 0 || pad > PAD_BLOCK_SIZE || pad > plain.len() {
        return Err(WechatError::Crypto(format!("Invalid padding: {}", pad)));
    }
    Ok(&plain[..plain.len() - pad])
}
