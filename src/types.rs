multiversx_sc::imports!();
multiversx_sc::derive_imports!();

// ============================================================
// Proposal — the core governance record
// ============================================================

#[type_abi]
#[derive(TopEncode, TopDecode, NestedEncode, NestedDecode, Clone, Debug)]
pub struct Proposal<M: ManagedTypeApi> {
    pub id: u64,
    /// Target contract the bundled call is made against.
    pub recipient: ManagedAddress<M>,
    pub description: ManagedBuffer<M>,
    /// Endpoint to invoke on the recipient. Opaque to the engine.
    pub endpoint_name: ManagedBuffer<M>,
    /// Raw top-encoded arguments, forwarded verbatim.
    pub call_args: ManagedVec<M, ManagedBuffer<M>>,
    pub votes_for: BigUint<M>,
    pub votes_against: BigUint<M>,
    /// Block timestamp when the debating period ends. Fixed at creation,
    /// unaffected by later changes to the debating period duration.
    pub end_time: u64,
    /// Set true exactly once, by finishProposal.
    pub closed: bool,
}
