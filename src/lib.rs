#![no_std]

multiversx_sc::imports!();

pub mod token_dao_proxy;
pub mod types;

use types::Proposal;

// ============================================================
// Contract
// ============================================================

#[multiversx_sc::contract]
pub trait TokenDao {
    // ========================================================
    // Init / Upgrade
    // ========================================================

    #[init]
    fn init(
        &self,
        chairperson: ManagedAddress,
        vote_token: TokenIdentifier,
        minimum_quorum: BigUint,
        debating_period: u64,
    ) {
        require!(
            minimum_quorum > 0u64,
            "Minimum quorum must be greater than zero"
        );
        require!(
            debating_period > 0u64,
            "Debating period must be greater than zero"
        );

        self.chairperson().set(&chairperson);
        self.vote_token().set(&vote_token);
        self.minimum_quorum().set(&minimum_quorum);
        self.debating_period().set(debating_period);
        self.proposal_count().set(0u64);
    }

    #[upgrade]
    fn upgrade(&self) {}

    // ========================================================
    // ENDPOINT: deposit
    // Stake the vote token to gain voting weight.
    // ========================================================

    #[endpoint(deposit)]
    #[payable("*")]
    fn deposit(&self) {
        let caller = self.blockchain().get_caller();
        let payment = self.call_value().single_esdt();

        require!(
            payment.token_identifier == self.vote_token().get() && payment.token_nonce == 0,
            "Wrong payment token"
        );
        require!(payment.amount > 0u64, "Amount must be greater than zero");

        self.deposits(&caller).update(|d| *d += &payment.amount);

        self.deposit_event(&caller, &payment.amount);
    }

    // ========================================================
    // ENDPOINT: withdrawDeposit
    // Returns the full deposit, unless it backs a vote on a
    // proposal that is still open.
    // ========================================================

    #[endpoint(withdrawDeposit)]
    fn withdraw_deposit(&self) {
        let caller = self.blockchain().get_caller();
        let amount = self.deposits(&caller).get();
        require!(amount > 0u64, "Nothing to withdraw");

        // The lock releases the moment every proposal the caller voted on
        // is closed, regardless of outcome.
        let vote_list_len = self.voter_proposals(&caller).len();
        for idx in 1..=vote_list_len {
            let proposal_id = self.voter_proposals(&caller).get(idx);
            let proposal = self.proposals(proposal_id).get();
            require!(proposal.closed, "Deposit is locked by an open vote");
        }

        self.deposits(&caller).set(BigUint::zero());
        self.voter_proposals(&caller).clear();

        self.send()
            .direct_esdt(&caller, &self.vote_token().get(), 0, &amount);

        self.withdraw_event(&caller, &amount);
    }

    // ========================================================
    // ENDPOINT: addProposal
    // Chairperson bundles an opaque call against a target
    // contract and opens it for voting.
    // ========================================================

    #[endpoint(addProposal)]
    fn add_proposal(
        &self,
        recipient: ManagedAddress,
        description: ManagedBuffer,
        endpoint_name: ManagedBuffer,
        call_args: MultiValueEncoded<ManagedBuffer>,
    ) -> u64 {
        let caller = self.blockchain().get_caller();
        require!(
            caller == self.chairperson().get(),
            "Only the chairperson can add proposals"
        );
        // Verified at creation only, never re-checked at execution.
        require!(
            self.blockchain().is_smart_contract(&recipient),
            "Recipient is not a smart contract"
        );

        let proposal_id = self.proposal_count().get() + 1u64;
        let end_time = self.blockchain().get_block_timestamp() + self.debating_period().get();

        let proposal = Proposal {
            id: proposal_id,
            recipient: recipient.clone(),
            description,
            endpoint_name,
            call_args: call_args.to_vec(),
            votes_for: BigUint::zero(),
            votes_against: BigUint::zero(),
            end_time,
            closed: false,
        };

        self.proposals(proposal_id).set(&proposal);
        self.proposal_count().set(proposal_id);

        self.proposal_created_event(proposal_id, &recipient);

        proposal_id
    }

    // ========================================================
    // ENDPOINT: vote
    // For/against voting weighted by the caller's deposit at
    // the moment of voting. Single-shot, no retraction.
    // ========================================================

    #[endpoint(vote)]
    fn vote(&self, proposal_id: u64, in_favor: bool) {
        let caller = self.blockchain().get_caller();
        self.require_proposal_exists(proposal_id);

        let mut proposal = self.proposals(proposal_id).get();

        let now = self.blockchain().get_block_timestamp();
        require!(now < proposal.end_time, "Debating period is over");
        require!(!proposal.closed, "Proposal already closed");

        let weight = self.deposits(&caller).get();
        require!(weight > 0u64, "No deposit to vote with");
        require!(
            !self.has_voted(proposal_id, &caller).get(),
            "Already voted on this proposal"
        );

        if in_favor {
            proposal.votes_for += &weight;
        } else {
            proposal.votes_against += &weight;
        }

        self.proposals(proposal_id).set(&proposal);
        self.has_voted(proposal_id, &caller).set(true);
        // Locks the caller's deposit until this proposal closes.
        self.voter_proposals(&caller).push(&proposal_id);

        self.vote_event(proposal_id, &caller, in_favor, &weight);
    }

    // ========================================================
    // ENDPOINT: finishProposal
    // Anyone can close a proposal once the debating period is
    // over. Quorum + majority trigger the bundled call.
    // ========================================================

    #[endpoint(finishProposal)]
    fn finish_proposal(&self, proposal_id: u64) {
        self.require_proposal_exists(proposal_id);

        let mut proposal = self.proposals(proposal_id).get();
        require!(!proposal.closed, "Proposal already closed");

        let now = self.blockchain().get_block_timestamp();
        require!(now >= proposal.end_time, "Debating period is not over yet");

        let total_votes = &proposal.votes_for + &proposal.votes_against;
        let quorum_reached = total_votes >= self.minimum_quorum().get();
        let passed = quorum_reached && proposal.votes_for > proposal.votes_against;

        // Closed is persisted before the external call so a reentrant callee
        // sees the proposal closed. If the call fails, the whole transaction
        // reverts, this write included, and the proposal stays open.
        proposal.closed = true;
        self.proposals(proposal_id).set(&proposal);

        if passed {
            self.tx()
                .to(&proposal.recipient)
                .raw_call(proposal.endpoint_name.clone())
                .arguments_raw(proposal.call_args.clone().into())
                .sync_call();
        }

        self.proposal_finished_event(proposal_id, passed);
    }

    // ========================================================
    // ENDPOINTS: self-governance setters
    // Reachable only through a passed proposal targeting this
    // contract. Each enforces its own invariant; a rejected
    // setter aborts the enclosing finishProposal entirely.
    // ========================================================

    #[endpoint(setMinimumQuorum)]
    fn set_minimum_quorum(&self, new_quorum: BigUint) {
        self.require_self_call();
        require!(
            new_quorum > 0u64,
            "Minimum quorum must be greater than zero"
        );

        self.minimum_quorum().set(&new_quorum);
        self.minimum_quorum_changed_event(&new_quorum);
    }

    #[endpoint(setDebatingPeriod)]
    fn set_debating_period(&self, new_period: u64) {
        self.require_self_call();
        require!(
            new_period > 0u64,
            "Debating period must be greater than zero"
        );

        self.debating_period().set(new_period);
        self.debating_period_changed_event(new_period);
    }

    #[endpoint(setChairperson)]
    fn set_chairperson(&self, new_chairperson: ManagedAddress) {
        self.require_self_call();
        require!(!new_chairperson.is_zero(), "Chairperson cannot be zero");

        self.chairperson().set(&new_chairperson);
        self.chairperson_changed_event(&new_chairperson);
    }

    // ========================================================
    // INTERNAL
    // ========================================================

    fn require_proposal_exists(&self, proposal_id: u64) {
        require!(
            proposal_id >= 1 && proposal_id <= self.proposal_count().get(),
            "Proposal does not exist"
        );
    }

    fn require_self_call(&self) {
        require!(
            self.blockchain().get_caller() == self.blockchain().get_sc_address(),
            "Only callable through a passed proposal"
        );
    }

    // ========================================================
    // VIEWS — read-only queries
    // ========================================================

    #[view(getProposal)]
    fn get_proposal(&self, proposal_id: u64) -> Proposal<Self::Api> {
        self.require_proposal_exists(proposal_id);
        self.proposals(proposal_id).get()
    }

    #[view(getActiveProposals)]
    fn get_active_proposals(&self) -> MultiValueEncoded<Proposal<Self::Api>> {
        let mut result = MultiValueEncoded::new();
        let total = self.proposal_count().get();
        let now = self.blockchain().get_block_timestamp();

        for id in 1..=total {
            let proposal = self.proposals(id).get();
            if !proposal.closed && now < proposal.end_time {
                result.push(proposal);
            }
        }
        result
    }

    #[view(getProposalCount)]
    fn get_proposal_count(&self) -> u64 {
        self.proposal_count().get()
    }

    #[view(getDeposit)]
    fn get_deposit(&self, account: &ManagedAddress) -> BigUint {
        self.deposits(account).get()
    }

    #[view(hasVoted)]
    fn has_account_voted(&self, proposal_id: u64, account: &ManagedAddress) -> bool {
        self.has_voted(proposal_id, account).get()
    }

    #[view(getChairperson)]
    fn get_chairperson(&self) -> ManagedAddress {
        self.chairperson().get()
    }

    #[view(getVoteToken)]
    fn get_vote_token(&self) -> TokenIdentifier {
        self.vote_token().get()
    }

    #[view(getMinimumQuorum)]
    fn get_minimum_quorum(&self) -> BigUint {
        self.minimum_quorum().get()
    }

    #[view(getDebatingPeriod)]
    fn get_debating_period(&self) -> u64 {
        self.debating_period().get()
    }

    // ========================================================
    // EVENTS
    // ========================================================

    #[event("deposit")]
    fn deposit_event(&self, #[indexed] depositor: &ManagedAddress, amount: &BigUint);

    #[event("withdraw")]
    fn withdraw_event(&self, #[indexed] depositor: &ManagedAddress, amount: &BigUint);

    #[event("proposalCreated")]
    fn proposal_created_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] recipient: &ManagedAddress,
    );

    #[event("vote")]
    fn vote_event(
        &self,
        #[indexed] proposal_id: u64,
        #[indexed] voter: &ManagedAddress,
        #[indexed] in_favor: bool,
        weight: &BigUint,
    );

    #[event("proposalFinished")]
    fn proposal_finished_event(&self, #[indexed] proposal_id: u64, #[indexed] passed: bool);

    #[event("minimumQuorumChanged")]
    fn minimum_quorum_changed_event(&self, new_quorum: &BigUint);

    #[event("debatingPeriodChanged")]
    fn debating_period_changed_event(&self, new_period: u64);

    #[event("chairpersonChanged")]
    fn chairperson_changed_event(&self, #[indexed] new_chairperson: &ManagedAddress);

    // ========================================================
    // STORAGE
    // ========================================================

    // ── Configuration — mutable only through a passed proposal ──

    #[storage_mapper("chairperson")]
    fn chairperson(&self) -> SingleValueMapper<ManagedAddress>;

    #[storage_mapper("voteToken")]
    fn vote_token(&self) -> SingleValueMapper<TokenIdentifier>;

    #[storage_mapper("minimumQuorum")]
    fn minimum_quorum(&self) -> SingleValueMapper<BigUint>;

    #[storage_mapper("debatingPeriod")]
    fn debating_period(&self) -> SingleValueMapper<u64>;

    // ── Deposit ledger ──

    #[storage_mapper("deposits")]
    fn deposits(&self, account: &ManagedAddress) -> SingleValueMapper<BigUint>;

    // ── Proposals ──

    #[storage_mapper("proposalCount")]
    fn proposal_count(&self) -> SingleValueMapper<u64>;

    #[storage_mapper("proposals")]
    fn proposals(&self, proposal_id: u64) -> SingleValueMapper<Proposal<Self::Api>>;

    #[storage_mapper("hasVoted")]
    fn has_voted(&self, proposal_id: u64, voter: &ManagedAddress) -> SingleValueMapper<bool>;

    // ── Per-account vote tracking for the withdrawal lock ──

    #[storage_mapper("voterProposals")]
    fn voter_proposals(&self, voter: &ManagedAddress) -> VecMapper<u64>;
}
