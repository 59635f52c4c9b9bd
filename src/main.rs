use ecsig::{Curve, EcError, SignatureScheme};
use sha2::{Digest, Sha256};

fn main() -> Result<(), EcError> {
    let scheme = SignatureScheme::new(Curve::named("P-256")?);
    let mut rng = rand::thread_rng();

    // two parties; each keeps its private scalar and shares only the point
    let alice = scheme.generate_key_pair(&mut rng);
    let bob = scheme.generate_key_pair(&mut rng);
    let alice_public = alice.public_key();
    let bob_public = bob.public_key();

    let message = "Hello, world!";
    let digest: [u8; 32] = Sha256::digest(message.as_bytes()).into();
    let signature = scheme.sign(&digest, &alice, &mut rng)?;

    let accepted = scheme.verify(&digest, &signature, &alice_public)?;
    println!("bob verifies alice's signature: {}", accepted);

    let tampered: [u8; 32] = Sha256::digest("Hello, world?".as_bytes()).into();
    let tampered_accepted = scheme.verify(&tampered, &signature, &alice_public)?;
    println!("same signature on a tampered message: {}", tampered_accepted);

    let wrong_key = scheme.verify(&digest, &signature, &bob_public)?;
    println!("alice's signature against bob's key: {}", wrong_key);

    Ok(())
}
